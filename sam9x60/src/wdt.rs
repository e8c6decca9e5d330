//! # Watchdog timer (WDT).
use arbitrary_int::u12;

pub const WDT_BASE_ADDR: usize = 0xFFFF_FF80;

/// Write key for the control register.
pub const WDT_KEY: u8 = 0xA5;

/// Control register.
#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct Control {
    /// Restart the watchdog.
    #[bit(0, rw)]
    wdrstt: bool,
    #[bits(24..=31, rw)]
    key: u8,
}

/// Mode register. This register can only be written once after reset.
#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct Mode {
    /// Counter value loaded on restart.
    #[bits(0..=11, rw)]
    wdv: u12,
    /// Fault interrupt enable.
    #[bit(12, rw)]
    wdfien: bool,
    /// Assert a reset on watchdog fault.
    #[bit(13, rw)]
    wdrsten: bool,
    /// Watchdog disable.
    #[bit(15, rw)]
    wddis: bool,
    /// Delta value defining the permitted restart window.
    #[bits(16..=27, rw)]
    wdd: u12,
    /// Stop the watchdog while in debug state.
    #[bit(28, rw)]
    wddbghlt: bool,
    /// Stop the watchdog while the processor is idle.
    #[bit(29, rw)]
    wdidlehlt: bool,
}

/// Watchdog timer.
#[derive(derive_mmio::Mmio)]
#[repr(C)]
pub struct Wdt {
    cr: Control,
    mr: Mode,
    /// Status register.
    sr: u32,
}

static_assertions::const_assert_eq!(core::mem::size_of::<Wdt>(), 0x0C);

impl Wdt {
    /// Create a new WDT MMIO instance at the fixed base address.
    ///
    /// # Safety
    ///
    /// This API can be used to create multiple handles to the same peripheral structure. The
    /// user must ensure that concurrent accesses do not interfere with each other.
    #[inline]
    pub const unsafe fn new_mmio_fixed() -> MmioWdt<'static> {
        unsafe { Wdt::new_mmio_at(WDT_BASE_ADDR) }
    }
}
