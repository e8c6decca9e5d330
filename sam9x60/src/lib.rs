//! # PAC for the Microchip SAM9X60 SoC
//!
//! Peripheral register blocks for the SAM9X60, covering the blocks touched by the early boot
//! path: system configuration (SFR), reset controller, clock generator (PMC), DDR memory
//! controller (MPDDRC), pin controllers, debug unit, periodic interval timer and watchdog.
//!
//! All register blocks are modeled with [derive_mmio] and can be instantiated at their fixed
//! SoC addresses or, for host-side testing, at an arbitrary address backed by plain memory.
#![no_std]

pub mod dbgu;
pub mod mpddrc;
pub mod pio;
pub mod pit;
pub mod pmc;
pub mod rstc;
pub mod sfr;
pub mod wdt;

use core::sync::atomic::{AtomicBool, Ordering};

static PERIPHERALS_TAKEN: AtomicBool = AtomicBool::new(false);

/// All peripheral blocks used by the early boot path.
pub struct Peripherals {
    pub sfr: sfr::MmioSfr<'static>,
    pub mpddrc: mpddrc::MmioMpddrc<'static>,
    pub dbgu: dbgu::MmioDbgu<'static>,
    pub pioa: pio::MmioPio<'static>,
    pub piob: pio::MmioPio<'static>,
    pub pioc: pio::MmioPio<'static>,
    pub piod: pio::MmioPio<'static>,
    pub pmc: pmc::MmioPmc<'static>,
    pub rstc: rstc::MmioRstc<'static>,
    pub pit: pit::MmioPit<'static>,
    pub wdt: wdt::MmioWdt<'static>,
}

impl Peripherals {
    /// Take the peripherals once.
    ///
    /// Returns [None] on subsequent calls.
    pub fn take() -> Option<Self> {
        if PERIPHERALS_TAKEN.swap(true, Ordering::SeqCst) {
            return None;
        }
        // Safety: The atomic flag guarantees at most one instance through this constructor.
        Some(unsafe { Self::steal() })
    }

    /// Create the peripheral structure, circumventing the singleton check of [Self::take].
    ///
    /// # Safety
    ///
    /// This can be used to create multiple handles to the same peripheral blocks. The user must
    /// ensure that no read-modify-write races occur on any of the registers.
    pub unsafe fn steal() -> Self {
        unsafe {
            Self {
                sfr: sfr::Sfr::new_mmio_fixed(),
                mpddrc: mpddrc::Mpddrc::new_mmio_fixed(),
                dbgu: dbgu::Dbgu::new_mmio_fixed(),
                pioa: pio::Pio::new_mmio_fixed_a(),
                piob: pio::Pio::new_mmio_fixed_b(),
                pioc: pio::Pio::new_mmio_fixed_c(),
                piod: pio::Pio::new_mmio_fixed_d(),
                pmc: pmc::Pmc::new_mmio_fixed(),
                rstc: rstc::Rstc::new_mmio_fixed(),
                pit: pit::Pit::new_mmio_fixed(),
                wdt: wdt::Wdt::new_mmio_fixed(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peripherals_singleton() {
        // Creating the handles performs no hardware access, so this is host-safe.
        assert!(Peripherals::take().is_some());
        assert!(Peripherals::take().is_none());
    }
}

