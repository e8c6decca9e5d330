//! # SD/MMC interface setup.
//!
//! Pin and clock enablement for SDMMC0 only; the card driver itself belongs to the next
//! boot stage.
use sam9x60::{pio::MmioPio, pmc::MmioPmc};
use sam9x60_hal::{
    PeripheralId, clocks,
    clocks::GckSource,
    gpio::{self, Function, PinDesc, Pull},
};

/// Generic clock divider for the SDMMC0 card clock, sourced from PLLA.
pub const SDHC_GCK_DIV: u8 = 5;

/// SDMMC0 pins on PIOA, peripheral A.
const SDMMC0_PINS: [PinDesc; 6] = [
    PinDesc::new(16, Function::PeriphA, Pull::None),
    PinDesc::new(17, Function::PeriphA, Pull::None),
    PinDesc::new(15, Function::PeriphA, Pull::None),
    PinDesc::new(18, Function::PeriphA, Pull::None),
    PinDesc::new(19, Function::PeriphA, Pull::None),
    PinDesc::new(20, Function::PeriphA, Pull::None),
];

/// Configure the SDMMC0 pins and enable its bus and generic clocks.
pub fn sdhc_hw_init(pioa: &mut MmioPio<'static>, pmc: &mut MmioPmc<'static>) {
    gpio::configure(pioa, &SDMMC0_PINS);
    clocks::enable_periph_clock(pmc, PeripheralId::Sdmmc0);
    clocks::enable_generic_clock(pmc, PeripheralId::Sdmmc0, GckSource::Plla, SDHC_GCK_DIV);
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::MaybeUninit;
    use sam9x60::{pio::Pio, pmc::Pmc};

    #[test]
    fn test_sdhc_setup() {
        let mut pio_block = MaybeUninit::<Pio>::zeroed();
        let mut pmc_block = MaybeUninit::<Pmc>::zeroed();
        let mut pioa = unsafe { Pio::new_mmio_at(pio_block.as_mut_ptr() as usize) };
        let mut pmc = unsafe { Pmc::new_mmio_at(pmc_block.as_mut_ptr() as usize) };

        sdhc_hw_init(&mut pioa, &mut pmc);

        // The last configured pin was PA20.
        assert_eq!(pioa.read_pdr(), 1 << 20);
        let pcr = pmc.read_pcr();
        assert_eq!(pcr.pid().value(), PeripheralId::Sdmmc0.raw());
        assert_eq!(pcr.gckcss().unwrap(), GckSource::Plla);
        assert_eq!(pcr.gckdiv(), SDHC_GCK_DIV);
        assert!(pcr.en());
        assert!(pcr.gcken());
    }
}
