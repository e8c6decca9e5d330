//! # Debug unit (DBGU) serial module.
//!
//! The DBGU is a two-pin UART with a fixed 8N1-style frame, used as the boot console.
use core::convert::Infallible;

use libm::round;
use sam9x60::dbgu::{
    BaudRateGenerator, ChannelMode, Control, MmioDbgu, ModeRegister, Parity,
};

use crate::time::Hertz;

/// Fixed oversampling factor of the baud rate generator.
pub const OVERSAMPLING: u32 = 16;

#[derive(Debug, thiserror::Error)]
#[error("divisor is zero or out of range")]
pub struct DivisorZero;

/// Baud rate generator configuration.
#[derive(Debug, Clone, Copy)]
pub struct ClockConfig {
    cd: u16,
}

impl ClockConfig {
    #[inline]
    pub const fn new_raw(cd: u16) -> Result<Self, DivisorZero> {
        if cd == 0 {
            return Err(DivisorZero);
        }
        Ok(Self { cd })
    }

    /// Calculate the clock divisor for the target baud rate.
    ///
    /// Returns the configuration and the relative baud error in percent.
    pub fn new_autocalc_with_error(
        mck: Hertz,
        target_baud: u32,
    ) -> Result<(Self, f64), DivisorZero> {
        if target_baud == 0 {
            return Err(DivisorZero);
        }
        let cd = round(mck.raw() as f64 / (OVERSAMPLING * target_baud) as f64) as u64;
        if cd == 0 || cd > u16::MAX as u64 {
            return Err(DivisorZero);
        }
        let cfg = Self { cd: cd as u16 };
        let error = ((cfg.actual_baud(mck) - target_baud as f64).abs() / target_baud as f64) * 100.0;
        Ok((cfg, error))
    }

    #[inline]
    pub const fn cd(&self) -> u16 {
        self.cd
    }

    /// Baud rate produced by this divisor for the given master clock.
    pub fn actual_baud(&self, mck: Hertz) -> f64 {
        mck.raw() as f64 / (OVERSAMPLING as f64 * self.cd as f64)
    }
}

/// Debug unit driver.
pub struct Dbgu {
    regs: MmioDbgu<'static>,
    cfg: ClockConfig,
}

impl Dbgu {
    /// Reset the peripheral and configure it for console operation: no parity, normal channel
    /// mode, receiver and transmitter enabled.
    pub fn new(mut regs: MmioDbgu<'static>, cfg: ClockConfig) -> Self {
        let mut cr = Control::new_with_raw_value(0);
        cr.set_rstrx(true);
        cr.set_rsttx(true);
        cr.set_rxdis(true);
        cr.set_txdis(true);
        regs.write_cr(cr);

        let mut mr = ModeRegister::new_with_raw_value(0);
        mr.set_par(Parity::None);
        mr.set_chmode(ChannelMode::Normal);
        regs.write_mr(mr);

        let mut brgr = BaudRateGenerator::new_with_raw_value(0);
        brgr.set_cd(cfg.cd());
        regs.write_brgr(brgr);

        let mut cr = Control::new_with_raw_value(0);
        cr.set_rxen(true);
        cr.set_txen(true);
        regs.write_cr(cr);

        Self { regs, cfg }
    }

    #[inline]
    pub const fn cfg(&self) -> &ClockConfig {
        &self.cfg
    }

    #[inline]
    pub fn regs(&mut self) -> &mut MmioDbgu<'static> {
        &mut self.regs
    }

    #[inline]
    fn write_byte_blocking(&mut self, byte: u8) {
        while !self.regs.read_sr().txrdy() {
            core::hint::spin_loop();
        }
        self.regs.write_thr(byte as u32);
    }
}

impl embedded_hal_nb::serial::ErrorType for Dbgu {
    type Error = Infallible;
}

impl embedded_hal_nb::serial::Write for Dbgu {
    #[inline]
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        if !self.regs.read_sr().txrdy() {
            return Err(nb::Error::WouldBlock);
        }
        self.regs.write_thr(word as u32);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        if !self.regs.read_sr().txempty() {
            return Err(nb::Error::WouldBlock);
        }
        Ok(())
    }
}

impl embedded_io::ErrorType for Dbgu {
    type Error = Infallible;
}

impl embedded_io::Write for Dbgu {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for byte in buf {
            self.write_byte_blocking(*byte);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        while !self.regs.read_sr().txempty() {
            core::hint::spin_loop();
        }
        Ok(())
    }
}

impl core::fmt::Write for Dbgu {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for byte in s.as_bytes() {
            self.write_byte_blocking(*byte);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::abs_diff_eq;
    use core::mem::MaybeUninit;
    use sam9x60::dbgu::{Dbgu as DbguBlock, Status};

    const MCK: Hertz = Hertz::from_raw(200_000_000);

    #[test]
    fn test_baud_calc_115200() {
        let (cfg, error) = ClockConfig::new_autocalc_with_error(MCK, 115_200).unwrap();
        assert_eq!(cfg.cd(), 109);
        assert!(error < 1.0);
        assert!(abs_diff_eq!(cfg.actual_baud(MCK), 114678.899, epsilon = 0.01));
    }

    #[test]
    fn test_baud_calc_9600() {
        let (cfg, error) = ClockConfig::new_autocalc_with_error(MCK, 9600).unwrap();
        assert_eq!(cfg.cd(), 1302);
        assert!(error < 0.1);
    }

    #[test]
    fn test_zero_baud_rejected() {
        assert!(ClockConfig::new_autocalc_with_error(MCK, 0).is_err());
        assert!(ClockConfig::new_raw(0).is_err());
    }

    #[test]
    fn test_console_setup() {
        let mut block = MaybeUninit::<DbguBlock>::zeroed();
        let mut regs = unsafe { DbguBlock::new_mmio_at(block.as_mut_ptr() as usize) };
        // Transmitter is always ready in the simulated block.
        let mut sr = Status::new_with_raw_value(0);
        sr.set_txrdy(true);
        sr.set_txempty(true);
        regs.write_sr(sr);

        let cfg = ClockConfig::new_autocalc_with_error(MCK, 115_200).unwrap().0;
        let mut console = Dbgu::new(regs, cfg);

        assert_eq!(console.cfg().cd(), 109);
        assert_eq!(console.regs().read_brgr().cd(), 109);
        let mr = console.regs().read_mr();
        assert_eq!(mr.par().unwrap(), Parity::None);
        assert_eq!(mr.chmode(), ChannelMode::Normal);
        let cr = console.regs().read_cr();
        assert!(cr.rxen());
        assert!(cr.txen());

        embedded_io::Write::write(&mut console, b"ok").unwrap();
        assert_eq!(console.regs().read_thr(), b'k' as u32);

        embedded_hal_nb::serial::Write::write(&mut console, b'!').unwrap();
        assert_eq!(console.regs().read_thr(), b'!' as u32);
    }
}
