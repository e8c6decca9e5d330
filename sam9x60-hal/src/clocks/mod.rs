//! # Clock generator (PMC) module.
//!
//! Master clock selection and the peripheral, system and generic clock gates. The PLL
//! configuration lives in the [pll] submodule.
use arbitrary_int::u7;
use sam9x60::pmc::{
    MmioPmc,
    regs::{PeripheralControl, SystemClocks},
};

use crate::PeripheralId;

pub mod pll;

pub use sam9x60::pmc::regs::{
    GckSource, MasterClockDivider, MasterClockPrescaler, MasterClockSource,
};

/// Clocks gated through the system clock enable register.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SystemClockSelect {
    Ddr,
}

/// Master clock prescaler and source selection.
#[derive(Debug, Clone, Copy)]
pub struct MckConfig {
    pub css: MasterClockSource,
    pub pres: MasterClockPrescaler,
    pub mdiv: MasterClockDivider,
}

impl MckConfig {
    pub const fn new(
        css: MasterClockSource,
        pres: MasterClockPrescaler,
        mdiv: MasterClockDivider,
    ) -> Self {
        Self { css, pres, mdiv }
    }
}

#[inline]
fn wait_mck_ready(pmc: &mut MmioPmc<'static>) {
    while !pmc.read_sr().mckrdy() {
        core::hint::spin_loop();
    }
}

/// Switch the master clock to the given source and prescaler configuration.
///
/// The fields are programmed one at a time with a ready poll after each write, so the
/// prescaler and processor clock divider are in place before the new source is selected.
/// Clock and PLL setup must precede every peripheral that derives its timing from the
/// master clock domain.
pub fn configure_mck(pmc: &mut MmioPmc<'static>, cfg: &MckConfig) {
    pmc.modify_mckr(|mut val| {
        val.set_pres(cfg.pres);
        val
    });
    wait_mck_ready(pmc);
    pmc.modify_mckr(|mut val| {
        val.set_mdiv(cfg.mdiv);
        val
    });
    wait_mck_ready(pmc);
    pmc.modify_mckr(|mut val| {
        val.set_css(cfg.css);
        val
    });
    wait_mck_ready(pmc);
}

/// Enable the bus clock of a peripheral, which is required to access its registers.
#[inline]
pub fn enable_periph_clock(pmc: &mut MmioPmc<'static>, select: PeripheralId) {
    let mut pcr = PeripheralControl::new_with_raw_value(0);
    pcr.set_pid(u7::new(select.raw()));
    pcr.set_cmd(true);
    pcr.set_en(true);
    pmc.write_pcr(pcr);
}

/// Enable one of the clocks gated through the system clock enable register.
#[inline]
pub fn enable_system_clock(pmc: &mut MmioPmc<'static>, select: SystemClockSelect) {
    let mut scer = SystemClocks::new_with_raw_value(0);
    match select {
        SystemClockSelect::Ddr => scer.set_ddr(true),
    }
    pmc.write_scer(scer);
}

/// Enable the generic clock of a peripheral.
///
/// The generic clock is the selected source divided by `div` plus one. The peripheral bus
/// clock is kept enabled by the same write.
pub fn enable_generic_clock(
    pmc: &mut MmioPmc<'static>,
    select: PeripheralId,
    css: GckSource,
    div: u8,
) {
    let mut pcr = PeripheralControl::new_with_raw_value(0);
    pcr.set_pid(u7::new(select.raw()));
    pcr.set_gckcss(css);
    pcr.set_gckdiv(div);
    pcr.set_cmd(true);
    pcr.set_en(true);
    pcr.set_gcken(true);
    pmc.write_pcr(pcr);
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::MaybeUninit;
    use sam9x60::pmc::{Pmc, regs::Status};

    fn sim_pmc(block: &mut MaybeUninit<Pmc>) -> MmioPmc<'static> {
        let mut pmc = unsafe { Pmc::new_mmio_at(block.as_mut_ptr() as usize) };
        // Pretend the master clock is already stable so ready polls terminate.
        let mut sr = Status::new_with_raw_value(0);
        sr.set_mckrdy(true);
        pmc.write_sr(sr);
        pmc
    }

    #[test]
    fn test_mck_switch() {
        let mut block = MaybeUninit::<Pmc>::zeroed();
        let mut pmc = sim_pmc(&mut block);
        configure_mck(
            &mut pmc,
            &MckConfig::new(
                MasterClockSource::Plla,
                MasterClockPrescaler::Div1,
                MasterClockDivider::Div1,
            ),
        );
        let mckr = pmc.read_mckr();
        assert_eq!(mckr.css(), MasterClockSource::Plla);
        assert_eq!(mckr.pres().unwrap(), MasterClockPrescaler::Div1);
        assert_eq!(mckr.mdiv(), MasterClockDivider::Div1);
    }

    #[test]
    fn test_periph_clock_enable() {
        let mut block = MaybeUninit::<Pmc>::zeroed();
        let mut pmc = sim_pmc(&mut block);
        enable_periph_clock(&mut pmc, PeripheralId::Dbgu);
        let pcr = pmc.read_pcr();
        assert_eq!(pcr.pid().value(), 47);
        assert!(pcr.cmd());
        assert!(pcr.en());
        assert!(!pcr.gcken());
    }

    #[test]
    fn test_generic_clock_enable() {
        let mut block = MaybeUninit::<Pmc>::zeroed();
        let mut pmc = sim_pmc(&mut block);
        enable_generic_clock(&mut pmc, PeripheralId::Sdmmc0, GckSource::Plla, 5);
        let pcr = pmc.read_pcr();
        assert_eq!(pcr.pid().value(), 12);
        assert_eq!(pcr.gckcss().unwrap(), GckSource::Plla);
        assert_eq!(pcr.gckdiv(), 5);
        assert!(pcr.en());
        assert!(pcr.gcken());
    }

    #[test]
    fn test_ddr_system_clock() {
        let mut block = MaybeUninit::<Pmc>::zeroed();
        let mut pmc = sim_pmc(&mut block);
        enable_system_clock(&mut pmc, SystemClockSelect::Ddr);
        assert!(pmc.read_scer().ddr());
    }
}
