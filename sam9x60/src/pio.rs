//! # Parallel I/O controllers (PIO).
//!
//! Each controller manages up to 32 pins through set/clear register pairs. The same block
//! layout is instantiated four times (PIOA to PIOD).
pub const PIOA_BASE_ADDR: usize = 0xFFFF_F400;
pub const PIOB_BASE_ADDR: usize = 0xFFFF_F600;
pub const PIOC_BASE_ADDR: usize = 0xFFFF_F800;
pub const PIOD_BASE_ADDR: usize = 0xFFFF_FA00;

/// Parallel I/O controller. All registers are one-bit-per-pin masks.
#[derive(derive_mmio::Mmio)]
#[repr(C)]
pub struct Pio {
    /// PIO enable: pin is driven by the PIO controller.
    per: u32,
    /// PIO disable: pin is driven by the selected peripheral function.
    pdr: u32,
    /// PIO status.
    psr: u32,

    _gap0: u32,

    /// Output enable.
    oer: u32,
    /// Output disable.
    odr: u32,
    /// Output status.
    osr: u32,

    _gap1: u32,

    /// Input filter enable.
    ifer: u32,
    /// Input filter disable.
    ifdr: u32,
    /// Input filter status.
    ifsr: u32,

    _gap2: u32,

    /// Set output data.
    sodr: u32,
    /// Clear output data.
    codr: u32,
    /// Output data status.
    odsr: u32,
    /// Pin data status.
    pdsr: u32,
    ier: u32,
    idr: u32,
    imr: u32,
    isr: u32,
    /// Multi-driver (open drain) enable.
    mder: u32,
    /// Multi-driver disable.
    mddr: u32,
    /// Multi-driver status.
    mdsr: u32,

    _gap3: u32,

    /// Pull-up disable.
    pudr: u32,
    /// Pull-up enable.
    puer: u32,
    /// Pull-up status.
    pusr: u32,

    _gap4: u32,

    /// Peripheral function select, low bit.
    abcdsr1: u32,
    /// Peripheral function select, high bit.
    abcdsr2: u32,
}

static_assertions::const_assert_eq!(core::mem::size_of::<Pio>(), 0x78);

impl Pio {
    /// Create a new PIO MMIO instance at an arbitrary controller base address.
    ///
    /// # Safety
    ///
    /// The address must point to a PIO register block. This API can be used to create multiple
    /// handles to the same peripheral structure, the user must ensure that concurrent accesses
    /// do not interfere with each other.
    #[inline]
    pub const unsafe fn new_mmio_fixed_a() -> MmioPio<'static> {
        unsafe { Pio::new_mmio_at(PIOA_BASE_ADDR) }
    }

    /// See [Self::new_mmio_fixed_a].
    ///
    /// # Safety
    ///
    /// See [Self::new_mmio_fixed_a].
    #[inline]
    pub const unsafe fn new_mmio_fixed_b() -> MmioPio<'static> {
        unsafe { Pio::new_mmio_at(PIOB_BASE_ADDR) }
    }

    /// See [Self::new_mmio_fixed_a].
    ///
    /// # Safety
    ///
    /// See [Self::new_mmio_fixed_a].
    #[inline]
    pub const unsafe fn new_mmio_fixed_c() -> MmioPio<'static> {
        unsafe { Pio::new_mmio_at(PIOC_BASE_ADDR) }
    }

    /// See [Self::new_mmio_fixed_a].
    ///
    /// # Safety
    ///
    /// See [Self::new_mmio_fixed_a].
    #[inline]
    pub const unsafe fn new_mmio_fixed_d() -> MmioPio<'static> {
        unsafe { Pio::new_mmio_at(PIOD_BASE_ADDR) }
    }
}
