//! # Multiport DDR-SDRAM controller (MPDDRC).
pub const MPDDRC_BASE_ADDR: usize = 0xFFFF_E800;

/// Base address of the external memory window routed to the controller via EBI chip select 1.
pub const DDR_CS_BASE_ADDR: usize = 0x2000_0000;

pub mod regs {
    use arbitrary_int::{u3, u4, u7, u12};

    /// Command issued by the controller on the next access to the DDR memory window.
    #[bitbybit::bitenum(u3, exhaustive = true)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum Command {
        Normal = 0b000,
        Nop = 0b001,
        PrechargeAll = 0b010,
        LoadModeRegister = 0b011,
        AutoRefresh = 0b100,
        ExtLoadModeRegister = 0b101,
        DeepPowerdown = 0b110,
        LpddrLoadModeRegister = 0b111,
    }

    /// Mode register.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct Mode {
        #[bits(0..=2, rw)]
        mode: Command,
    }

    /// Refresh timer register.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct RefreshTimer {
        /// Refresh period in master clock cycles.
        #[bits(0..=11, rw)]
        count: u12,
    }

    /// Number of column address bits. Encodings are given for DDR devices, SDR devices use
    /// one bit less.
    #[bitbybit::bitenum(u2, exhaustive = true)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum ColumnBits {
        Col9 = 0b00,
        Col10 = 0b01,
        Col11 = 0b10,
        Col12 = 0b11,
    }

    /// Number of row address bits.
    #[bitbybit::bitenum(u2, exhaustive = true)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum RowBits {
        Row11 = 0b00,
        Row12 = 0b01,
        Row13 = 0b10,
        Row14 = 0b11,
    }

    #[bitbybit::bitenum(u1, exhaustive = true)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum BankCount {
        Four = 0,
        Eight = 1,
    }

    /// Output driver impedance control.
    #[bitbybit::bitenum(u1, exhaustive = true)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum DriveStrength {
        Normal = 0,
        /// Weak driver strength, RZQ/7 for DDR2 devices.
        Weak = 1,
    }

    /// Mapping of the bank address bits inside the address word.
    #[bitbybit::bitenum(u1, exhaustive = true)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum DecodingScheme {
        /// Bank bits above the row bits.
        Sequential = 0,
        /// Bank bits directly above the column bits.
        Interleaved = 1,
    }

    /// Configuration register.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct Configuration {
        #[bits(0..=1, rw)]
        nc: ColumnBits,
        #[bits(2..=3, rw)]
        nr: RowBits,
        /// CAS latency in clock cycles.
        #[bits(4..=6, rw)]
        cas: u3,
        /// Reset the DLL on the next load mode register command.
        #[bit(7, rw)]
        dll_reset: bool,
        #[bit(8, rw)]
        dic_ds: DriveStrength,
        /// Disable the DLL of the memory device.
        #[bit(9, rw)]
        dis_dll: bool,
        /// Off-chip driver calibration mode for the next extended load mode register command.
        #[bits(12..=14, rw)]
        ocd: u3,
        #[bit(20, rw)]
        nb: BankCount,
        #[bit(21, rw)]
        ndqs: bool,
        #[bit(22, rw)]
        decod: DecodingScheme,
        /// Support for unaligned accesses.
        #[bit(23, rw)]
        unal: bool,
    }

    /// OCD calibration mode: default calibration value.
    pub const OCD_DEFAULT_CALIBRATION: u3 = u3::new(0b111);
    /// OCD calibration mode: exit calibration, maintain settings.
    pub const OCD_EXIT_CALIBRATION: u3 = u3::new(0b000);

    /// Timing parameter register 0.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct TimingParameter0 {
        /// Active to precharge delay.
        #[bits(0..=3, rw)]
        tras: u4,
        /// Row to column delay.
        #[bits(4..=7, rw)]
        trcd: u4,
        /// Write recovery delay.
        #[bits(8..=11, rw)]
        twr: u4,
        /// Row cycle delay.
        #[bits(12..=15, rw)]
        trc: u4,
        /// Row precharge delay.
        #[bits(16..=19, rw)]
        trp: u4,
        /// Active bank A to active bank B delay.
        #[bits(20..=23, rw)]
        trrd: u4,
        /// Internal write to read delay.
        #[bits(24..=26, rw)]
        twtr: u3,
        /// Load mode register to active or refresh delay.
        #[bits(28..=31, rw)]
        tmrd: u4,
    }

    /// Timing parameter register 1.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct TimingParameter1 {
        /// Row cycle delay between a refresh and an activate command.
        #[bits(0..=6, rw)]
        trfc: u7,
        /// Exit self refresh delay to non-read command.
        #[bits(8..=15, rw)]
        txsnr: u8,
        /// Exit self refresh delay to read command.
        #[bits(16..=23, rw)]
        txsrd: u8,
        /// Exit power-down delay to first command.
        #[bits(24..=27, rw)]
        txp: u4,
    }

    /// Timing parameter register 2.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct TimingParameter2 {
        /// Exit active power down delay to read command in mode "fast exit".
        #[bits(0..=3, rw)]
        txard: u4,
        /// Exit active power down delay to read command in mode "slow exit".
        #[bits(4..=7, rw)]
        txards: u4,
        /// Row precharge all delay.
        #[bits(8..=11, rw)]
        trpa: u4,
        /// Read to precharge delay.
        #[bits(12..=14, rw)]
        trtp: u3,
        /// Four bank activation window.
        #[bits(16..=19, rw)]
        tfaw: u4,
    }

    #[bitbybit::bitenum(u1, exhaustive = true)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum BusWidth {
        ThirtyTwoBits = 0,
        SixteenBits = 1,
    }

    #[bitbybit::bitenum(u3, exhaustive = true)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum MemoryDevice {
        Sdr = 0b000,
        LowPowerSdr = 0b001,
        Ddr = 0b010,
        LowPowerDdr = 0b011,
        Ddr3 = 0b100,
        LowPowerDdr3 = 0b101,
        Ddr2 = 0b110,
        LowPowerDdr2 = 0b111,
    }

    /// Memory device register.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct MemoryDeviceRegister {
        #[bits(0..=2, rw)]
        md: MemoryDevice,
        #[bit(4, rw)]
        dbw: BusWidth,
    }

    /// Resistor divider feeding the output impedance calibration cell.
    #[bitbybit::bitenum(u3)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum CalibrationResistor {
        None = 0b000,
        Rzq33 = 0b001,
        Rzq50 = 0b010,
        Rzq67 = 0b011,
        /// On-die termination class RZQ/100, used for DDR2 devices.
        Rzq100 = 0b100,
    }

    /// I/O calibration register.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct IoCalibration {
        #[bits(0..=2, rw)]
        rdiv: Option<CalibrationResistor>,
        /// Impedance calibration time in master clock cycles.
        #[bits(8..=14, rw)]
        tzqio: u7,
    }

    /// Shift applied to the read data sampling point.
    #[bitbybit::bitenum(u2, exhaustive = true)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum SamplingShift {
        None = 0b00,
        OneCycle = 0b01,
        TwoCycles = 0b10,
        ThreeCycles = 0b11,
    }

    /// Read data path register.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct ReadDataPath {
        #[bits(0..=1, rw)]
        shift_sampling: SamplingShift,
    }
}

/// Multiport DDR-SDRAM controller.
#[derive(derive_mmio::Mmio)]
#[repr(C)]
pub struct Mpddrc {
    mr: regs::Mode,
    rtr: regs::RefreshTimer,
    cr: regs::Configuration,
    tpr0: regs::TimingParameter0,
    tpr1: regs::TimingParameter1,
    tpr2: regs::TimingParameter2,

    _gap0: u32,

    /// Low power register.
    lpr: u32,
    md: regs::MemoryDeviceRegister,

    _gap1: [u32; 0x04],

    io_calibr: regs::IoCalibration,

    _gap2: [u32; 0x09],

    rd_data_path: regs::ReadDataPath,
}

static_assertions::const_assert_eq!(core::mem::size_of::<Mpddrc>(), 0x60);

impl Mpddrc {
    /// Create a new MPDDRC MMIO instance at the fixed base address.
    ///
    /// # Safety
    ///
    /// This API can be used to create multiple handles to the same peripheral structure. The
    /// user must ensure that concurrent accesses do not interfere with each other.
    #[inline]
    pub const unsafe fn new_mmio_fixed() -> MmioMpddrc<'static> {
        unsafe { Mpddrc::new_mmio_at(MPDDRC_BASE_ADDR) }
    }
}
