//! # Special function registers (SFR).
pub const SFR_BASE_ADDR: usize = 0xF805_0000;

/// External bus interface routing and DDR data path configuration.
#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct DdrConfig {
    /// Route EBI chip select 1 to the DDR controller instead of the static memory controller.
    #[bit(1, rw)]
    ebi_cs1_ddr: bool,
    /// Enable the DDR multi-port data path.
    #[bit(16, rw)]
    ddr_mp_enable: bool,
}

/// Special function registers.
#[derive(derive_mmio::Mmio)]
#[repr(C)]
pub struct Sfr {
    _gap0: u32,

    ddrcfg: DdrConfig,
    /// External bus interface configuration.
    ebicfg: u32,
}

static_assertions::const_assert_eq!(core::mem::size_of::<Sfr>(), 0x0C);

impl Sfr {
    /// Create a new SFR MMIO instance at the fixed base address.
    ///
    /// # Safety
    ///
    /// This API can be used to create multiple handles to the same peripheral structure. The
    /// user must ensure that concurrent accesses do not interfere with each other.
    #[inline]
    pub const unsafe fn new_mmio_fixed() -> MmioSfr<'static> {
        unsafe { Sfr::new_mmio_at(SFR_BASE_ADDR) }
    }
}
