//! # Board support for the Microchip SAM9X60-EK evaluation kit.
//!
//! Early boot bring-up: this crate owns the board constants and the fixed hardware
//! initialization sequence which takes the board from power-on reset to a state with a
//! configured clock tree, a usable debug console, a running timer and initialized DDR2
//! memory. The next bootloader stage is expected to call [init::hw_init] exactly once and
//! then proceed to load its payload.
//!
//! Build-time features select the compiled-in hardware profile, there is no runtime
//! branching: `hw-init` for the initialization sequence itself, `ddr2` for the DDR2 memory
//! setup, `sdhc0` for the SD/MMC interface and `fdt` for device tree name reporting.
#![no_std]

#[cfg(feature = "hw-init")]
pub mod init;

#[cfg(feature = "ddr2")]
pub mod ddr2;
#[cfg(feature = "sdhc0")]
pub mod sdmmc;

use embedded_hal::digital::PinState;
use sam9x60::{dbgu, mpddrc, pio, pit, pmc, rstc, sfr, wdt};
use sam9x60_hal::{
    gpio,
    time::Hertz,
    uart::{ClockConfig, Dbgu, OVERSAMPLING},
};

/// Main crystal oscillator frequency, the reference for the PLL.
pub const MAIN_OSC_FREQUENCY: Hertz = Hertz::from_raw(4_000_000);

/// PLLA output frequency: the 4 MHz reference times 50.
pub const PLLA_FREQUENCY: Hertz = Hertz::from_raw(200_000_000);

/// Master clock: PLLA selected undivided.
pub const MASTER_CLOCK: Hertz = PLLA_FREQUENCY;

pub const CONSOLE_BAUD_RATE: u32 = 115_200;

const CONSOLE_CLOCK_DIVISOR_RAW: u32 = (MASTER_CLOCK.raw()
    + (OVERSAMPLING * CONSOLE_BAUD_RATE) / 2)
    / (OVERSAMPLING * CONSOLE_BAUD_RATE);

/// Console divisor, checked at build time.
pub const CONSOLE_CLOCK_CONFIG: ClockConfig =
    match ClockConfig::new_raw(CONSOLE_CLOCK_DIVISOR_RAW as u16) {
        Ok(cfg) => cfg,
        Err(_) => panic!("console clock divisor out of range"),
    };

/// Device tree blob describing this board, reported to the next boot stage.
#[cfg(feature = "fdt")]
pub const DTB_NAME: &str = "at91-sam9x60ek.dtb";

/// Name of the device tree blob for this exact board, independent of every other
/// configuration flag.
#[cfg(feature = "fdt")]
pub fn dtb_filename() -> &'static str {
    DTB_NAME
}

/// All peripheral handles touched by the boot path, passed explicitly to every
/// initialization step.
pub struct BoardPeripherals {
    pub sfr: sfr::MmioSfr<'static>,
    pub rstc: rstc::MmioRstc<'static>,
    pub pmc: pmc::MmioPmc<'static>,
    pub pioa: pio::MmioPio<'static>,
    pub piob: pio::MmioPio<'static>,
    pub dbgu: dbgu::MmioDbgu<'static>,
    pub pit: pit::MmioPit<'static>,
    pub wdt: wdt::MmioWdt<'static>,
    pub mpddrc: mpddrc::MmioMpddrc<'static>,
    /// Base of the external memory window routed to the DDR controller.
    pub ddr_base: *mut u32,
}

impl BoardPeripherals {
    /// Create the board context over the fixed SoC addresses.
    ///
    /// # Safety
    ///
    /// Must only be called once; the context aliases all boot-relevant peripheral blocks.
    pub unsafe fn new_from_soc() -> Self {
        unsafe {
            Self {
                sfr: sfr::Sfr::new_mmio_fixed(),
                rstc: rstc::Rstc::new_mmio_fixed(),
                pmc: pmc::Pmc::new_mmio_fixed(),
                pioa: pio::Pio::new_mmio_fixed_a(),
                piob: pio::Pio::new_mmio_fixed_b(),
                dbgu: dbgu::Dbgu::new_mmio_fixed(),
                pit: pit::Pit::new_mmio_fixed(),
                wdt: wdt::Wdt::new_mmio_fixed(),
                mpddrc: mpddrc::Mpddrc::new_mmio_fixed(),
                ddr_base: mpddrc::DDR_CS_BASE_ADDR as *mut u32,
            }
        }
    }
}

/// Drive the RGB LED package as boot indicator: red and blue off, green on.
pub fn green_led_on(piob: &mut pio::MmioPio<'static>) {
    gpio::set_output(piob, 13, PinState::Low);
    gpio::set_output(piob, 11, PinState::Low);
    gpio::set_output(piob, 12, PinState::High);
}

/// Build the console driver. The debug unit must have been brought up by the
/// initialization sequence before.
pub fn console(board: &mut BoardPeripherals) -> Dbgu {
    // Safety: The driver takes over the block configured by the console init step.
    Dbgu::new(unsafe { board.dbgu.clone() }, CONSOLE_CLOCK_CONFIG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_divisor() {
        assert_eq!(CONSOLE_CLOCK_CONFIG.cd(), 109);
    }

    #[cfg(feature = "fdt")]
    #[test]
    fn test_dtb_name() {
        assert_eq!(dtb_filename(), "at91-sam9x60ek.dtb");
    }
}
