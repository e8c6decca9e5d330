//! Low-level DDR configuration module.
use sam9x60::mpddrc::{MmioMpddrc, regs::*};

/// JEDEC mandates 200 us of stable clock before CKE is driven high. The loop count is sized
/// for the maximum master clock frequency and only ever errs towards a longer wait.
const CLOCK_STABLE_DELAY_LOOPS: u32 = 50_000;
/// Short settle time between mode register accesses, covers tMRD at any supported clock.
const COMMAND_DELAY_LOOPS: u32 = 100;

/// Full static MPDDRC configuration set for one memory device.
#[derive(Debug, Clone, Copy)]
pub struct MpddrcConfigSet {
    pub md: MemoryDeviceRegister,
    pub cr: Configuration,
    pub rtr: RefreshTimer,
    pub tpr0: TimingParameter0,
    pub tpr1: TimingParameter1,
    pub tpr2: TimingParameter2,
}

#[inline]
fn spin_delay(loops: u32) {
    for _ in 0..loops {
        core::hint::spin_loop();
    }
}

/// Byte offset into the DDR memory window which selects the given bank, assuming the
/// interleaved decoding scheme where the bank bits sit directly above the column bits.
fn bank_offset(cfg: &MpddrcConfigSet, bank: u32) -> usize {
    let column_bits = match cfg.cr.nc() {
        ColumnBits::Col9 => 9,
        ColumnBits::Col10 => 10,
        ColumnBits::Col11 => 11,
        ColumnBits::Col12 => 12,
    };
    let lane_shift = match cfg.md.dbw() {
        BusWidth::SixteenBits => 1,
        BusWidth::ThirtyTwoBits => 2,
    };
    (bank as usize) << (column_bits + lane_shift)
}

/// Program the mode register and perform the DDR window access which makes the controller
/// issue the command on the memory bus.
fn send_command(mpddrc: &mut MmioMpddrc<'static>, ddr_base: *mut u32, cmd: Command, offset: usize) {
    let mut mr = Mode::new_with_raw_value(0);
    mr.set_mode(cmd);
    mpddrc.write_mr(mr);
    // Safety: The caller provides a valid DDR window base, offsets stay within the first
    // row of each bank.
    unsafe { core::ptr::write_volatile(ddr_base.byte_add(offset), 0) };
    spin_delay(COMMAND_DELAY_LOOPS);
}

/// Program the output impedance calibration for the given on-die termination class.
///
/// The divider field is fully replaced rather than or-ed, so a stale value from a previous
/// boot stage cannot survive. Applying this twice yields the same register value as applying
/// it once.
pub fn calibrate_io_impedance(mpddrc: &mut MmioMpddrc<'static>, rdiv: CalibrationResistor) {
    let mut calibr = mpddrc.read_io_calibr();
    calibr.set_rdiv(rdiv);
    mpddrc.write_io_calibr(calibr);
}

/// Run the JEDEC DDR2 power-up and initialization sequence.
///
/// No status is reported: wrong timing values produce an unstable memory array which is only
/// observable as a later boot failure.
pub fn init_ddr2(mpddrc: &mut MmioMpddrc<'static>, ddr_base: *mut u32, cfg: &MpddrcConfigSet) {
    mpddrc.write_md(cfg.md);
    mpddrc.write_cr(cfg.cr);
    mpddrc.write_tpr0(cfg.tpr0);
    mpddrc.write_tpr1(cfg.tpr1);
    mpddrc.write_tpr2(cfg.tpr2);

    // Step 1: NOP to assert the clock enable signal.
    send_command(mpddrc, ddr_base, Command::Nop, 0);
    spin_delay(CLOCK_STABLE_DELAY_LOOPS);

    // Step 2: NOP to drive CKE high.
    send_command(mpddrc, ddr_base, Command::Nop, 0);

    // Step 3: Precharge all banks.
    send_command(mpddrc, ddr_base, Command::PrechargeAll, 0);

    // Step 4: Extended mode register 2.
    send_command(
        mpddrc,
        ddr_base,
        Command::ExtLoadModeRegister,
        bank_offset(cfg, 2),
    );

    // Step 5: Extended mode register 3.
    send_command(
        mpddrc,
        ddr_base,
        Command::ExtLoadModeRegister,
        bank_offset(cfg, 3),
    );

    // Step 6: Extended mode register 1, enable the device DLL.
    send_command(
        mpddrc,
        ddr_base,
        Command::ExtLoadModeRegister,
        bank_offset(cfg, 1),
    );

    // Step 7: Mode register write with DLL reset.
    mpddrc.modify_cr(|mut val| {
        val.set_dll_reset(true);
        val
    });
    send_command(mpddrc, ddr_base, Command::LoadModeRegister, 0);

    // Step 8: Precharge all banks again.
    send_command(mpddrc, ddr_base, Command::PrechargeAll, 0);

    // Steps 9 and 10: Two auto-refresh cycles.
    send_command(mpddrc, ddr_base, Command::AutoRefresh, 0);
    send_command(mpddrc, ddr_base, Command::AutoRefresh, 0);

    // Step 11: Mode register write with the DLL reset bit cleared.
    mpddrc.modify_cr(|mut val| {
        val.set_dll_reset(false);
        val
    });
    send_command(mpddrc, ddr_base, Command::LoadModeRegister, 0);

    // Step 12: Extended mode register 1, OCD default calibration.
    mpddrc.modify_cr(|mut val| {
        val.set_ocd(OCD_DEFAULT_CALIBRATION);
        val
    });
    send_command(
        mpddrc,
        ddr_base,
        Command::ExtLoadModeRegister,
        bank_offset(cfg, 1),
    );

    // Step 13: Extended mode register 1, exit OCD calibration.
    mpddrc.modify_cr(|mut val| {
        val.set_ocd(OCD_EXIT_CALIBRATION);
        val
    });
    send_command(
        mpddrc,
        ddr_base,
        Command::ExtLoadModeRegister,
        bank_offset(cfg, 1),
    );

    // Step 14: Back to normal operating mode.
    send_command(mpddrc, ddr_base, Command::Normal, 0);

    // Step 15: Start the refresh engine.
    mpddrc.write_rtr(cfg.rtr);

    log::debug!("MPDDRC initialization sequence complete");
}

/// Dump the controller register state for diagnostics. No functional effect.
pub fn dump_regs(mpddrc: &mut MmioMpddrc<'static>) {
    log::debug!("MPDDRC MD: {:#010x}", mpddrc.read_md().raw_value());
    log::debug!("MPDDRC CR: {:#010x}", mpddrc.read_cr().raw_value());
    log::debug!("MPDDRC RTR: {:#010x}", mpddrc.read_rtr().raw_value());
    log::debug!("MPDDRC TPR0: {:#010x}", mpddrc.read_tpr0().raw_value());
    log::debug!("MPDDRC TPR1: {:#010x}", mpddrc.read_tpr1().raw_value());
    log::debug!("MPDDRC TPR2: {:#010x}", mpddrc.read_tpr2().raw_value());
    log::debug!(
        "MPDDRC IO_CALIBR: {:#010x}",
        mpddrc.read_io_calibr().raw_value()
    );
    log::debug!(
        "MPDDRC RD_DATA_PATH: {:#010x}",
        mpddrc.read_rd_data_path().raw_value()
    );
}
