//! # PLL configuration module.
use arbitrary_int::{u4, u22};

use sam9x60::pmc::{
    MmioPmc,
    regs::{PllControl0, PllControl1},
};

use crate::time::Hertz;

/// Maximum value of the hardware multiplier field.
pub const PLL_MUL_MAX: u32 = 255;

/// Default PLL startup wait, in slow clock cycles.
pub const DEFAULT_STARTUP_CYCLES: u8 = 0x3F;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("pll multiplier value {0} is out of range (0..={PLL_MUL_MAX})")]
pub struct MulOutOfRangeError(pub u32);

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PllConfigError {
    #[error("reference clock, target clock or divider is zero")]
    InvalidInput,
    #[error("pll multiplier out of range: {0}")]
    MulOutOfRange(#[from] MulOutOfRangeError),
}

/// The PLL instances of the SoC.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PllId {
    Plla = 0,
    Upll = 1,
}

/// Configuration of one PLL instance.
///
/// The synthesized output frequency is the reference frequency multiplied by the multiplier
/// field plus one, divided by the divider. The fractional adjustment allows sub-integer
/// multiples and is kept at zero by every integer-ratio configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PllConfig {
    mul: u8,
    div: u8,
    count: u8,
    loop_filter: u4,
    fracr: u22,
}

impl PllConfig {
    /// Create a configuration for the smallest integer multiplier reaching the target clock.
    ///
    /// The divider is fixed to one, so the target must be an integer multiple of the
    /// reference for the output to match exactly.
    pub fn new_from_target_clock(
        ref_clk: Hertz,
        target_clk: Hertz,
    ) -> Result<Self, PllConfigError> {
        if ref_clk.raw() == 0 {
            return Err(PllConfigError::InvalidInput);
        }
        let ratio = target_clk / ref_clk;
        if ratio == 0 {
            return Err(PllConfigError::InvalidInput);
        }
        Self::new(ratio - 1, 1).map_err(PllConfigError::from)
    }

    /// Create a new PLL configuration based on the hardware multiplier and divider values.
    ///
    /// Note that the hardware multiplier is the desired frequency multiple minus one.
    pub fn new(mul: u32, div: u8) -> Result<Self, MulOutOfRangeError> {
        if mul > PLL_MUL_MAX {
            return Err(MulOutOfRangeError(mul));
        }
        Ok(Self::new_raw(
            mul as u8,
            div,
            DEFAULT_STARTUP_CYCLES,
            u4::new(0),
            u22::new(0),
        ))
    }

    /// Create a new PLL configuration with raw register field values.
    ///
    /// The divider must be non-zero for the frequency invariant to be meaningful.
    pub const fn new_raw(mul: u8, div: u8, count: u8, loop_filter: u4, fracr: u22) -> Self {
        Self {
            mul,
            div,
            count,
            loop_filter,
            fracr,
        }
    }

    #[inline]
    pub const fn mul(&self) -> u8 {
        self.mul
    }

    #[inline]
    pub const fn div(&self) -> u8 {
        self.div
    }

    #[inline]
    pub const fn count(&self) -> u8 {
        self.count
    }

    #[inline]
    pub const fn loop_filter(&self) -> u4 {
        self.loop_filter
    }

    #[inline]
    pub const fn fracr(&self) -> u22 {
        self.fracr
    }

    /// Output frequency synthesized from the given reference:
    /// reference times multiplier plus one, divided by the divider.
    pub const fn effective_frequency(&self, ref_clk: Hertz) -> Hertz {
        Hertz::from_raw(ref_clk.raw() * (self.mul as u32 + 1) / self.div as u32)
    }
}

/// Program one PLL instance and block until its lock indicator is asserted.
///
/// The register sequence follows the hardware programming model: select the target PLL,
/// program the analog loop filter and the feedback path, latch, then enable the PLL with its
/// output divider and startup count and latch again. The final poll has no timeout. A
/// configuration the hardware cannot lock to stalls boot here, which is the accepted failure
/// mode for bring-up code running before any fault reporting channel exists.
///
/// This function should only be called once per PLL during system initialization.
pub fn configure_pll(pmc: &mut MmioPmc<'static>, id: PllId, cfg: &PllConfig) {
    // Step 1: Select the PLL the control registers apply to.
    pmc.modify_pll_updt(|mut val| {
        val.set_id(u4::new(id as u8));
        val.set_update(false);
        val
    });

    pmc.modify_pll_acr(|mut val| {
        val.set_loop_filter(cfg.loop_filter);
        val
    });

    // Step 2: Program the feedback path and latch it into the selected PLL.
    let mut ctrl1 = PllControl1::new_with_raw_value(0);
    ctrl1.set_mul(cfg.mul);
    ctrl1.set_fracr(cfg.fracr);
    pmc.write_pll_ctrl1(ctrl1);
    pmc.modify_pll_updt(|mut val| {
        val.set_update(true);
        val
    });

    // Step 3: Enable the PLL and its output with the configured startup count.
    let mut ctrl0 = PllControl0::new_with_raw_value(0);
    ctrl0.set_divpmc(cfg.div);
    ctrl0.set_enlock(true);
    ctrl0.set_enpll(true);
    ctrl0.set_enpllck(true);
    pmc.write_pll_ctrl0(ctrl0);
    pmc.modify_pll_updt(|mut val| {
        val.set_startup_time(cfg.count);
        val.set_update(true);
        val
    });

    while !pll_locked(pmc, id) {
        core::hint::spin_loop();
    }
}

#[inline]
fn pll_locked(pmc: &mut MmioPmc<'static>, id: PllId) -> bool {
    let isr = pmc.read_pll_isr0();
    match id {
        PllId::Plla => isr.plla_locked(),
        PllId::Upll => isr.upll_locked(),
    }
}
