//! # Debug unit (DBGU).
//!
//! Two-pin UART used as the boot console.
pub const DBGU_BASE_ADDR: usize = 0xFFFF_F200;

/// Control register.
#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct Control {
    /// Reset the receiver.
    #[bit(2, rw)]
    rstrx: bool,
    /// Reset the transmitter.
    #[bit(3, rw)]
    rsttx: bool,
    #[bit(4, rw)]
    rxen: bool,
    #[bit(5, rw)]
    rxdis: bool,
    #[bit(6, rw)]
    txen: bool,
    #[bit(7, rw)]
    txdis: bool,
    /// Reset the status bits.
    #[bit(8, rw)]
    rststa: bool,
}

#[bitbybit::bitenum(u3)]
#[derive(Debug, PartialEq, Eq)]
pub enum Parity {
    Even = 0b000,
    Odd = 0b001,
    Space = 0b010,
    Mark = 0b011,
    None = 0b100,
}

#[bitbybit::bitenum(u2, exhaustive = true)]
#[derive(Debug, PartialEq, Eq)]
pub enum ChannelMode {
    Normal = 0b00,
    AutomaticEcho = 0b01,
    LocalLoopback = 0b10,
    RemoteLoopback = 0b11,
}

/// Mode register.
#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct ModeRegister {
    #[bits(9..=11, rw)]
    par: Option<Parity>,
    #[bits(14..=15, rw)]
    chmode: ChannelMode,
}

/// Status register. The same layout is used for the interrupt enable, disable and mask
/// registers.
#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct Status {
    /// A character is available in the receive holding register.
    #[bit(0, rw)]
    rxrdy: bool,
    /// The transmit holding register is empty.
    #[bit(1, rw)]
    txrdy: bool,
    /// Receiver overrun.
    #[bit(5, rw)]
    ovre: bool,
    /// Framing error.
    #[bit(6, rw)]
    frame: bool,
    /// Parity error.
    #[bit(7, rw)]
    pare: bool,
    /// Transmitter shift register and holding register are both empty.
    #[bit(9, rw)]
    txempty: bool,
}

/// Baud rate generator register. The baud rate is the master clock divided by 16 times CD.
#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct BaudRateGenerator {
    #[bits(0..=15, rw)]
    cd: u16,
}

/// Debug unit.
#[derive(derive_mmio::Mmio)]
#[repr(C)]
pub struct Dbgu {
    cr: Control,
    mr: ModeRegister,
    ier: Status,
    idr: Status,
    imr: Status,
    sr: Status,
    /// Receive holding register.
    rhr: u32,
    /// Transmit holding register.
    thr: u32,
    brgr: BaudRateGenerator,

    _gap0: [u32; 0x07],

    /// Chip identification register.
    cidr: u32,
    /// Chip identification extension register.
    exid: u32,
}

static_assertions::const_assert_eq!(core::mem::size_of::<Dbgu>(), 0x48);

impl Dbgu {
    /// Create a new DBGU MMIO instance at the fixed base address.
    ///
    /// # Safety
    ///
    /// This API can be used to create multiple handles to the same peripheral structure. The
    /// user must ensure that concurrent accesses do not interfere with each other.
    #[inline]
    pub const unsafe fn new_mmio_fixed() -> MmioDbgu<'static> {
        unsafe { Dbgu::new_mmio_at(DBGU_BASE_ADDR) }
    }
}
