//! # Pin configuration module (PIO controller).
//!
//! Pins are configured through small descriptor tables, one table per functional unit.
use embedded_hal::digital::PinState;
use sam9x60::pio::MmioPio;

/// Function a pin is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    PeriphA,
    PeriphB,
    PeriphC,
    PeriphD,
    /// PIO-driven output with an initial level.
    Output(PinState),
    /// PIO-driven input.
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pull {
    #[default]
    None,
    Up,
}

/// Descriptor for a single pin of one PIO controller.
#[derive(Debug, Clone, Copy)]
pub struct PinDesc {
    pub pin: u8,
    pub function: Function,
    pub pull: Pull,
}

impl PinDesc {
    pub const fn new(pin: u8, function: Function, pull: Pull) -> Self {
        Self {
            pin,
            function,
            pull,
        }
    }
}

/// Apply a pin descriptor table to one PIO controller.
pub fn configure(pio: &mut MmioPio<'static>, pins: &[PinDesc]) {
    for desc in pins {
        let mask = 1u32 << desc.pin;
        match desc.function {
            Function::PeriphA => select_peripheral(pio, mask, false, false),
            Function::PeriphB => select_peripheral(pio, mask, true, false),
            Function::PeriphC => select_peripheral(pio, mask, false, true),
            Function::PeriphD => select_peripheral(pio, mask, true, true),
            Function::Output(level) => {
                if level == PinState::High {
                    pio.write_sodr(mask);
                } else {
                    pio.write_codr(mask);
                }
                pio.write_oer(mask);
                pio.write_per(mask);
            }
            Function::Input => {
                pio.write_odr(mask);
                pio.write_per(mask);
            }
        }
        match desc.pull {
            Pull::None => pio.write_pudr(mask),
            Pull::Up => pio.write_puer(mask),
        }
    }
}

fn select_peripheral(pio: &mut MmioPio<'static>, mask: u32, sel_low: bool, sel_high: bool) {
    pio.modify_abcdsr1(|val| if sel_low { val | mask } else { val & !mask });
    pio.modify_abcdsr2(|val| if sel_high { val | mask } else { val & !mask });
    // Hand the pin over to the selected peripheral.
    pio.write_pdr(mask);
}

/// Configure a single pin as a PIO-driven output with the given level.
pub fn set_output(pio: &mut MmioPio<'static>, pin: u8, level: PinState) {
    configure(
        pio,
        &[PinDesc::new(pin, Function::Output(level), Pull::None)],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::MaybeUninit;
    use sam9x60::pio::Pio;

    fn sim_pio(block: &mut MaybeUninit<Pio>) -> MmioPio<'static> {
        unsafe { Pio::new_mmio_at(block.as_mut_ptr() as usize) }
    }

    #[test]
    fn test_peripheral_a_mux() {
        let mut block = MaybeUninit::<Pio>::zeroed();
        let mut pio = sim_pio(&mut block);
        // Stale mux selection which must be cleared for peripheral A.
        pio.modify_abcdsr1(|val| val | (1 << 9) | (1 << 10));
        configure(
            &mut pio,
            &[
                PinDesc::new(9, Function::PeriphA, Pull::None),
                PinDesc::new(10, Function::PeriphA, Pull::None),
            ],
        );
        assert_eq!(pio.read_abcdsr1() & ((1 << 9) | (1 << 10)), 0);
        assert_eq!(pio.read_abcdsr2() & ((1 << 9) | (1 << 10)), 0);
        assert_eq!(pio.read_pdr(), 1 << 10);
        assert_eq!(pio.read_pudr(), 1 << 10);
    }

    #[test]
    fn test_output_levels() {
        let mut block = MaybeUninit::<Pio>::zeroed();
        let mut pio = sim_pio(&mut block);
        set_output(&mut pio, 12, PinState::High);
        assert_eq!(pio.read_sodr(), 1 << 12);
        assert_eq!(pio.read_oer(), 1 << 12);
        assert_eq!(pio.read_per(), 1 << 12);
        set_output(&mut pio, 11, PinState::Low);
        assert_eq!(pio.read_codr(), 1 << 11);
    }
}
