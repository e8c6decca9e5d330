//! # Reset controller (RSTC).
use arbitrary_int::u4;

pub const RSTC_BASE_ADDR: usize = 0xFFFF_FE00;

/// Write key which must accompany every control and mode register write.
pub const RSTC_KEY: u8 = 0xA5;

/// Control register.
#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct Control {
    /// Processor and peripheral reset.
    #[bit(0, rw)]
    procrst: bool,
    /// Assert the external NRST line.
    #[bit(3, rw)]
    extrst: bool,
    #[bits(24..=31, rw)]
    key: u8,
}

/// Mode register.
#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct Mode {
    /// User reset enable: a low level on NRST resets the system.
    #[bit(0, rw)]
    ursten: bool,
    /// User reset interrupt enable.
    #[bit(4, rw)]
    urstien: bool,
    /// External reset length, as a power of two of slow clock cycles.
    #[bits(8..=11, rw)]
    erstl: u4,
    #[bits(24..=31, rw)]
    key: u8,
}

/// Reset controller.
#[derive(derive_mmio::Mmio)]
#[repr(C)]
pub struct Rstc {
    cr: Control,
    /// Status register.
    sr: u32,
    mr: Mode,
}

static_assertions::const_assert_eq!(core::mem::size_of::<Rstc>(), 0x0C);

impl Rstc {
    /// Create a new RSTC MMIO instance at the fixed base address.
    ///
    /// # Safety
    ///
    /// This API can be used to create multiple handles to the same peripheral structure. The
    /// user must ensure that concurrent accesses do not interfere with each other.
    #[inline]
    pub const unsafe fn new_mmio_fixed() -> MmioRstc<'static> {
        unsafe { Rstc::new_mmio_at(RSTC_BASE_ADDR) }
    }
}
