//! # Hardware initialization sequence.
//!
//! A single linear path executed once at boot. There is no branching beyond the build-time
//! inclusion of steps and no recovery path: a peripheral which never reports ready stalls
//! the sequence, which a human or a watchdog-equipped later stage has to resolve.
use arbitrary_int::{u4, u22};
use sam9x60::rstc::{Mode as RstcMode, RSTC_KEY};
use sam9x60_hal::{
    PeripheralId,
    clocks::{
        self, MasterClockDivider, MasterClockPrescaler, MasterClockSource, MckConfig,
        pll::{PllConfig, PllId, configure_pll},
    },
    gpio::{self, Function, PinDesc, Pull},
    timer::Pit,
    uart::Dbgu,
    wdt,
};

#[cfg(feature = "ddr2")]
use sam9x60_hal::ddr;

use crate::BoardPeripherals;

/// PLLA configuration: the 4 MHz reference times 50. The multiplier field carries the
/// desired multiple minus one, per the hardware convention.
pub const PLLA_CONFIG: PllConfig = PllConfig::new_raw(49, 1, 0x3F, u4::new(0), u22::new(0));

/// Master clock selection: PLLA, undivided.
pub const MCK_CONFIG: MckConfig = MckConfig::new(
    MasterClockSource::Plla,
    MasterClockPrescaler::Div1,
    MasterClockDivider::Div1,
);

/// Debug console pins: PA9 RXD and PA10 TXD on peripheral A.
const DBGU_PINS: [PinDesc; 2] = [
    PinDesc::new(9, Function::PeriphA, Pull::None),
    PinDesc::new(10, Function::PeriphA, Pull::None),
];

/// One named step of the fixed initialization sequence.
#[derive(Debug, Clone, Copy)]
pub struct InitStep {
    pub name: &'static str,
    pub run: fn(&mut BoardPeripherals),
}

/// The hardware initialization sequence in execution order.
///
/// The ordering is load-bearing: the watchdog goes first so nothing can reset the system
/// mid-sequence, the clock tree is configured before every peripheral deriving its timing
/// from it, and the DDR setup runs last so later stages can relocate into memory right
/// after the sequence returns.
pub const INIT_SEQUENCE: &[InitStep] = &[
    InitStep {
        name: "watchdog-disable",
        run: disable_watchdog,
    },
    InitStep {
        name: "boot-led",
        run: boot_led,
    },
    InitStep {
        name: "plla",
        run: setup_plla,
    },
    InitStep {
        name: "mck",
        run: setup_master_clock,
    },
    InitStep {
        name: "dbgu",
        run: setup_console,
    },
    InitStep {
        name: "reset-ctrl",
        run: enable_user_reset,
    },
    InitStep {
        name: "timer",
        run: start_timer,
    },
    #[cfg(feature = "ddr2")]
    InitStep {
        name: "ddr",
        run: setup_ddram,
    },
];

/// Run the full hardware initialization sequence.
///
/// Must be called exactly once after reset, before any other hardware access. On return the
/// console is usable, the timer is running and, with the `ddr2` profile, the external memory
/// is addressable.
pub fn hw_init(board: &mut BoardPeripherals) {
    for step in INIT_SEQUENCE {
        (step.run)(board);
    }
}

fn disable_watchdog(board: &mut BoardPeripherals) {
    wdt::disable(&mut board.wdt);
}

fn boot_led(board: &mut BoardPeripherals) {
    crate::green_led_on(&mut board.piob);
}

fn setup_plla(board: &mut BoardPeripherals) {
    configure_pll(&mut board.pmc, PllId::Plla, &PLLA_CONFIG);
}

fn setup_master_clock(board: &mut BoardPeripherals) {
    clocks::configure_mck(&mut board.pmc, &MCK_CONFIG);
}

fn setup_console(board: &mut BoardPeripherals) {
    gpio::configure(&mut board.pioa, &DBGU_PINS);
    clocks::enable_periph_clock(&mut board.pmc, PeripheralId::Dbgu);
    // The driver handle is rebuilt on demand through [crate::console], only the register
    // state has to persist here.
    // Safety: Single boot context, no other user of the block at this point.
    Dbgu::new(unsafe { board.dbgu.clone() }, crate::CONSOLE_CLOCK_CONFIG);
}

fn enable_user_reset(board: &mut BoardPeripherals) {
    let mut mr = RstcMode::new_with_raw_value(0);
    mr.set_ursten(true);
    mr.set_key(RSTC_KEY);
    board.rstc.write_mr(mr);
}

fn start_timer(board: &mut BoardPeripherals) {
    // Safety: Single boot context, no other user of the block at this point.
    Pit::start_free_running(unsafe { board.pit.clone() });
}

#[cfg(feature = "ddr2")]
fn setup_ddram(board: &mut BoardPeripherals) {
    ddr::configure_ddr_for_ddr2(
        &mut board.sfr,
        &mut board.pmc,
        &mut board.mpddrc,
        board.ddr_base,
        &crate::ddr2::MPDDRC_CONFIG,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::MaybeUninit;
    use sam9x60::{
        dbgu::Dbgu as DbguBlock,
        mpddrc::Mpddrc,
        pio::Pio,
        pit::Pit as PitBlock,
        pmc::{
            Pmc,
            regs::{PllInterruptStatus0, Status},
        },
        rstc::Rstc,
        sfr::Sfr,
        wdt::Wdt,
    };

    struct SimBlocks {
        sfr: MaybeUninit<Sfr>,
        rstc: MaybeUninit<Rstc>,
        pmc: MaybeUninit<Pmc>,
        pioa: MaybeUninit<Pio>,
        piob: MaybeUninit<Pio>,
        dbgu: MaybeUninit<DbguBlock>,
        pit: MaybeUninit<PitBlock>,
        wdt: MaybeUninit<Wdt>,
        mpddrc: MaybeUninit<Mpddrc>,
        ddr: [u32; 0x800],
    }

    impl SimBlocks {
        fn new() -> Self {
            Self {
                sfr: MaybeUninit::zeroed(),
                rstc: MaybeUninit::zeroed(),
                pmc: MaybeUninit::zeroed(),
                pioa: MaybeUninit::zeroed(),
                piob: MaybeUninit::zeroed(),
                dbgu: MaybeUninit::zeroed(),
                pit: MaybeUninit::zeroed(),
                wdt: MaybeUninit::zeroed(),
                mpddrc: MaybeUninit::zeroed(),
                ddr: [0; 0x800],
            }
        }

        /// Build the board context over the simulated blocks, with the hardware-ready bits
        /// the sequence polls for already asserted.
        fn board(&mut self) -> BoardPeripherals {
            let mut pmc = unsafe { Pmc::new_mmio_at(self.pmc.as_mut_ptr() as usize) };
            let mut sr = Status::new_with_raw_value(0);
            sr.set_mckrdy(true);
            pmc.write_sr(sr);
            let mut isr = PllInterruptStatus0::new_with_raw_value(0);
            isr.set_plla_locked(true);
            pmc.write_pll_isr0(isr);

            BoardPeripherals {
                sfr: unsafe { Sfr::new_mmio_at(self.sfr.as_mut_ptr() as usize) },
                rstc: unsafe { Rstc::new_mmio_at(self.rstc.as_mut_ptr() as usize) },
                pmc,
                pioa: unsafe { Pio::new_mmio_at(self.pioa.as_mut_ptr() as usize) },
                piob: unsafe { Pio::new_mmio_at(self.piob.as_mut_ptr() as usize) },
                dbgu: unsafe { DbguBlock::new_mmio_at(self.dbgu.as_mut_ptr() as usize) },
                pit: unsafe { PitBlock::new_mmio_at(self.pit.as_mut_ptr() as usize) },
                wdt: unsafe { Wdt::new_mmio_at(self.wdt.as_mut_ptr() as usize) },
                mpddrc: unsafe { Mpddrc::new_mmio_at(self.mpddrc.as_mut_ptr() as usize) },
                ddr_base: self.ddr.as_mut_ptr(),
            }
        }
    }

    fn position(name: &str) -> usize {
        INIT_SEQUENCE
            .iter()
            .position(|step| step.name == name)
            .unwrap()
    }

    #[test]
    fn test_ordering_invariants() {
        assert_eq!(INIT_SEQUENCE[0].name, "watchdog-disable");
        assert!(position("plla") < position("mck"));
        assert!(position("plla") < position("dbgu"));
        assert!(position("plla") < position("timer"));
        #[cfg(feature = "ddr2")]
        {
            assert!(position("plla") < position("ddr"));
            assert_eq!(position("ddr"), INIT_SEQUENCE.len() - 1);
        }
    }

    #[test]
    fn test_plla_reaches_board_target() {
        assert_eq!(
            PLLA_CONFIG.effective_frequency(crate::MAIN_OSC_FREQUENCY),
            crate::PLLA_FREQUENCY
        );
    }

    #[test]
    fn test_full_sequence() {
        let mut sim = SimBlocks::new();
        let mut board = sim.board();
        hw_init(&mut board);

        assert!(board.wdt.read_mr().wddis());

        // Green LED on, red and blue driven low.
        assert_eq!(board.piob.read_sodr(), 1 << 12);
        assert_eq!(board.piob.read_codr(), 1 << 11);

        assert_eq!(board.pmc.read_pll_ctrl1().mul(), 49);
        assert_eq!(board.pmc.read_pll_ctrl0().divpmc(), 1);
        assert_eq!(board.pmc.read_mckr().css(), MasterClockSource::Plla);

        // Console pins handed to peripheral A and the baud rate generator programmed.
        assert_eq!(board.pioa.read_pdr(), 1 << 10);
        assert_eq!(board.dbgu.read_brgr().cd(), 109);
        let cr = board.dbgu.read_cr();
        assert!(cr.rxen());
        assert!(cr.txen());
        // The console driver can be rebuilt over the configured block.
        let console = crate::console(&mut board);
        assert_eq!(console.cfg().cd(), 109);

        let rstc_mr = board.rstc.read_mr();
        assert!(rstc_mr.ursten());
        assert_eq!(rstc_mr.key(), RSTC_KEY);

        assert!(board.pit.read_mr().piten());

        #[cfg(feature = "ddr2")]
        {
            use sam9x60::mpddrc::regs::Command;
            let ddrcfg = board.sfr.read_ddrcfg();
            assert!(ddrcfg.ebi_cs1_ddr());
            assert!(ddrcfg.ddr_mp_enable());
            assert_eq!(board.mpddrc.read_mr().mode(), Command::Normal);
            assert_eq!(board.mpddrc.read_rtr().count().value(), 0x30E);
        }
    }

    /// Without the DDR2 profile, the sequence must not touch the DDR-related register
    /// ranges at all.
    #[cfg(not(feature = "ddr2"))]
    #[test]
    fn test_no_ddr_traffic_without_profile() {
        let mut sim = SimBlocks::new();
        {
            let mut board = sim.board();
            hw_init(&mut board);
        }
        let words = unsafe {
            core::slice::from_raw_parts(
                sim.mpddrc.as_ptr() as *const u32,
                core::mem::size_of::<Mpddrc>() / 4,
            )
        };
        assert!(words.iter().all(|word| *word == 0));
        let mut sfr = unsafe { Sfr::new_mmio_at(sim.sfr.as_mut_ptr() as usize) };
        assert_eq!(sfr.read_ddrcfg().raw_value(), 0);
        assert!(!sim.ddr.iter().any(|word| *word != 0));
    }
}
