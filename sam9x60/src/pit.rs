//! # Periodic interval timer (PIT).
pub const PIT_BASE_ADDR: usize = 0xFFFF_FE40;

use arbitrary_int::{u12, u20};

/// Mode register.
#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct Mode {
    /// Counter period in master clock cycles divided by 16.
    #[bits(0..=19, rw)]
    piv: u20,
    /// Timer enable.
    #[bit(24, rw)]
    piten: bool,
    /// Interrupt enable.
    #[bit(25, rw)]
    pitien: bool,
}

/// Status register.
#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct Status {
    /// The counter has wrapped since the last value register read.
    #[bit(0, rw)]
    pits: bool,
}

/// Current timer value. Reading [MmioPit::read_pivr] clears the wrap counter and the status
/// flag, reading [MmioPit::read_piir] does not.
#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct Value {
    /// Current counter value.
    #[bits(0..=19, rw)]
    cpiv: u20,
    /// Number of wraps since the last value register read.
    #[bits(20..=31, rw)]
    picnt: u12,
}

/// Periodic interval timer.
#[derive(derive_mmio::Mmio)]
#[repr(C)]
pub struct Pit {
    mr: Mode,
    sr: Status,
    /// Periodic interval value register, read clears the wrap count.
    pivr: Value,
    /// Periodic interval image register, read does not modify state.
    piir: Value,
}

static_assertions::const_assert_eq!(core::mem::size_of::<Pit>(), 0x10);

impl Pit {
    /// Create a new PIT MMIO instance at the fixed base address.
    ///
    /// # Safety
    ///
    /// This API can be used to create multiple handles to the same peripheral structure. The
    /// user must ensure that concurrent accesses do not interfere with each other.
    #[inline]
    pub const unsafe fn new_mmio_fixed() -> MmioPit<'static> {
        unsafe { Pit::new_mmio_at(PIT_BASE_ADDR) }
    }
}
