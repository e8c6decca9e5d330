//! # DDR module
//!
//! Brings up the multiport DDR controller for a DDR2 device: chip select routing, controller
//! clocks, data path and I/O calibration, then the JEDEC initialization sequence.
use sam9x60::{
    mpddrc::{
        MmioMpddrc,
        regs::{CalibrationResistor, ReadDataPath, SamplingShift},
    },
    pmc::MmioPmc,
    sfr::MmioSfr,
};

use crate::{
    PeripheralId,
    clocks::{self, SystemClockSelect},
};

pub mod ll;

pub use ll::MpddrcConfigSet;

/// This completely sets up the DDR controller for DDR2 operation.
///
/// It performs the following steps:
///
///  1. Routes EBI chip select 1 to the DDR controller and enables the multi-port data path.
///  2. Enables the controller peripheral clock and the DDR system clock.
///  3. Programs a one-cycle shift on the read data sampling point.
///  4. Programs the output impedance calibration for the DDR2 termination class.
///  5. Runs the JEDEC DDR2 power-up sequence with the provided timing configuration.
///
/// All timing values must be pre-computed from the memory device datasheet in master clock
/// cycles. They are written once and are not validated by this layer; wrong values surface
/// as a non-functional memory array later in boot.
pub fn configure_ddr_for_ddr2(
    sfr: &mut MmioSfr<'static>,
    pmc: &mut MmioPmc<'static>,
    mpddrc: &mut MmioMpddrc<'static>,
    ddr_base: *mut u32,
    cfg: &MpddrcConfigSet,
) {
    sfr.modify_ddrcfg(|mut val| {
        val.set_ebi_cs1_ddr(true);
        val.set_ddr_mp_enable(true);
        val
    });

    clocks::enable_periph_clock(pmc, PeripheralId::Mpddrc);
    clocks::enable_system_clock(pmc, SystemClockSelect::Ddr);

    let mut rd_path = ReadDataPath::new_with_raw_value(0);
    rd_path.set_shift_sampling(SamplingShift::OneCycle);
    mpddrc.write_rd_data_path(rd_path);

    ll::calibrate_io_impedance(mpddrc, CalibrationResistor::Rzq100);

    ll::init_ddr2(mpddrc, ddr_base, cfg);

    ll::dump_regs(mpddrc);
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::MaybeUninit;
    use sam9x60::{
        mpddrc::{Mpddrc, regs::*},
        pmc::Pmc,
        sfr::Sfr,
    };

    #[test]
    fn test_full_ddr2_bringup() {
        let mut sfr_block = MaybeUninit::<Sfr>::zeroed();
        let mut pmc_block = MaybeUninit::<Pmc>::zeroed();
        let mut mpddrc_block = MaybeUninit::<Mpddrc>::zeroed();
        let mut window = [0u32; 0x800];

        let mut sfr = unsafe { Sfr::new_mmio_at(sfr_block.as_mut_ptr() as usize) };
        let mut pmc = unsafe { Pmc::new_mmio_at(pmc_block.as_mut_ptr() as usize) };
        let mut mpddrc = unsafe { Mpddrc::new_mmio_at(mpddrc_block.as_mut_ptr() as usize) };

        let mut md = MemoryDeviceRegister::new_with_raw_value(0);
        md.set_md(MemoryDevice::Ddr2);
        md.set_dbw(BusWidth::SixteenBits);
        let mut cr = Configuration::new_with_raw_value(0);
        cr.set_nc(ColumnBits::Col10);
        cr.set_nr(RowBits::Row14);
        cr.set_nb(BankCount::Eight);
        cr.set_decod(DecodingScheme::Interleaved);
        let cfg = MpddrcConfigSet {
            md,
            cr,
            rtr: RefreshTimer::new_with_raw_value(0x30E),
            tpr0: TimingParameter0::new_with_raw_value(0),
            tpr1: TimingParameter1::new_with_raw_value(0),
            tpr2: TimingParameter2::new_with_raw_value(0),
        };

        configure_ddr_for_ddr2(&mut sfr, &mut pmc, &mut mpddrc, window.as_mut_ptr(), &cfg);

        let ddrcfg = sfr.read_ddrcfg();
        assert!(ddrcfg.ebi_cs1_ddr());
        assert!(ddrcfg.ddr_mp_enable());

        // The controller clock gates were the last PCR/SCER writes.
        assert!(pmc.read_scer().ddr());
        let pcr = pmc.read_pcr();
        assert_eq!(pcr.pid().value(), PeripheralId::Mpddrc.raw());
        assert!(pcr.en());

        assert_eq!(
            mpddrc.read_rd_data_path().shift_sampling(),
            SamplingShift::OneCycle
        );
        assert_eq!(
            mpddrc.read_io_calibr().rdiv().unwrap(),
            CalibrationResistor::Rzq100
        );
        assert_eq!(mpddrc.read_mr().mode(), Command::Normal);
        assert_eq!(mpddrc.read_rtr().count().value(), 0x30E);
    }
}
