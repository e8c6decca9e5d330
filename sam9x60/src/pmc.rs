//! # Power management controller (PMC).
//!
//! Clock generator of the SoC: main oscillator, the fractional PLLs, the master clock
//! prescaler and the peripheral, system and generic clock gates.
pub const PMC_BASE_ADDR: usize = 0xFFFF_FC00;

pub mod regs {
    use arbitrary_int::{u4, u7, u12, u22};

    /// System clock gates. The same layout is used for the enable, disable and status registers.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct SystemClocks {
        /// DDR system clock.
        #[bit(2, rw)]
        ddr: bool,
        /// USB host port clock.
        #[bit(6, rw)]
        uhp: bool,
        /// USB device port clock.
        #[bit(7, rw)]
        udp: bool,
        /// Programmable clock outputs.
        #[bit(8, rw)]
        pck0: bool,
        #[bit(9, rw)]
        pck1: bool,
    }

    /// PLL control register 0. Values are consumed on the next [PllUpdate] latch.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct PllControl0 {
        /// Output divider towards the PMC clock tree.
        #[bits(0..=7, rw)]
        divpmc: u8,
        #[bit(28, rw)]
        enpll: bool,
        /// Gates the PLL output towards the PMC.
        #[bit(29, rw)]
        enpllck: bool,
        /// Enables the lock detector for this PLL.
        #[bit(31, rw)]
        enlock: bool,
    }

    /// PLL control register 1, holding the feedback path configuration.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct PllControl1 {
        /// Fractional part of the loop divider.
        #[bits(0..=21, rw)]
        fracr: u22,
        /// Integer part of the loop divider. The synthesized frequency is the reference
        /// multiplied by this value plus one.
        #[bits(24..=31, rw)]
        mul: u8,
    }

    /// PLL analog control register.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct PllAnalogControl {
        /// Analog bias control.
        #[bits(0..=11, rw)]
        control: u12,
        /// Loop filter selection.
        #[bits(16..=19, rw)]
        loop_filter: u4,
    }

    /// PLL update register. Selects which PLL the control registers target and latches
    /// new configuration values into it.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct PllUpdate {
        /// Target PLL identifier.
        #[bits(0..=3, rw)]
        id: u4,
        /// Writing a one transfers the control register contents to the selected PLL.
        #[bit(8, rw)]
        update: bool,
        /// Startup time of the selected PLL, in slow clock cycles.
        #[bits(16..=23, rw)]
        startup_time: u8,
    }

    /// PLL interrupt status register 0, holding the per-PLL lock indicators.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct PllInterruptStatus0 {
        #[bit(0, rw)]
        plla_locked: bool,
        #[bit(1, rw)]
        upll_locked: bool,
    }

    pub const MAIN_OSC_KEY: u8 = 0x37;

    /// Main oscillator register.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct MainOscillator {
        /// Crystal oscillator enable.
        #[bit(0, rw)]
        moscxten: bool,
        /// Crystal oscillator bypass.
        #[bit(1, rw)]
        moscxtby: bool,
        /// Crystal start-up time in slow clock cycles times eight.
        #[bits(8..=15, rw)]
        moscxtst: u8,
        /// Must be written with [MAIN_OSC_KEY] for the write to take effect.
        #[bits(16..=23, rw)]
        key: u8,
        /// Selects the crystal oscillator instead of the RC oscillator as main clock.
        #[bit(24, rw)]
        moscsel: bool,
    }

    #[bitbybit::bitenum(u2, exhaustive = true)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum MasterClockSource {
        SlowClock = 0b00,
        MainClock = 0b01,
        Plla = 0b10,
        Upll = 0b11,
    }

    /// Power-of-two master clock prescaler.
    #[bitbybit::bitenum(u3)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum MasterClockPrescaler {
        Div1 = 0b000,
        Div2 = 0b001,
        Div4 = 0b010,
        Div8 = 0b011,
        Div16 = 0b100,
        Div32 = 0b101,
        Div64 = 0b110,
    }

    /// Divider between the processor clock and the master clock domain.
    #[bitbybit::bitenum(u2, exhaustive = true)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum MasterClockDivider {
        Div1 = 0b00,
        Div2 = 0b01,
        Div4 = 0b10,
        Div3 = 0b11,
    }

    /// Master clock register.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct MasterClock {
        #[bits(0..=1, rw)]
        css: MasterClockSource,
        #[bits(4..=6, rw)]
        pres: Option<MasterClockPrescaler>,
        #[bits(8..=9, rw)]
        mdiv: MasterClockDivider,
    }

    /// PMC status register.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct Status {
        /// Crystal oscillator stabilized.
        #[bit(0, rw)]
        moscxts: bool,
        /// Master clock ready.
        #[bit(3, rw)]
        mckrdy: bool,
        /// Slow clock source status.
        #[bit(7, rw)]
        oscsels: bool,
        /// Main clock source status.
        #[bit(16, rw)]
        moscsels: bool,
    }

    /// Clock source selection for the generic clocks.
    #[bitbybit::bitenum(u3)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum GckSource {
        SlowClock = 0b000,
        MainClock = 0b001,
        Plla = 0b010,
        Upll = 0b011,
        Mck = 0b100,
    }

    /// Peripheral control register. One write configures the clock gates of the peripheral
    /// selected by the PID field.
    #[bitbybit::bitfield(u32, default = 0x0, debug)]
    pub struct PeripheralControl {
        /// Peripheral identifier.
        #[bits(0..=6, rw)]
        pid: u7,
        /// Generic clock source.
        #[bits(8..=10, rw)]
        gckcss: Option<GckSource>,
        /// Read/write command. One writes the configuration, zero reads it back.
        #[bit(12, rw)]
        cmd: bool,
        /// Generic clock divider. The generic clock is the source divided by this value plus one.
        #[bits(20..=27, rw)]
        gckdiv: u8,
        /// Peripheral clock enable.
        #[bit(28, rw)]
        en: bool,
        /// Generic clock enable.
        #[bit(29, rw)]
        gcken: bool,
    }
}

/// Power management controller.
#[derive(derive_mmio::Mmio)]
#[repr(C)]
pub struct Pmc {
    /// System clock enable register.
    scer: regs::SystemClocks,
    /// System clock disable register.
    scdr: regs::SystemClocks,
    /// System clock status register.
    scsr: regs::SystemClocks,
    pll_ctrl0: regs::PllControl0,
    pll_ctrl1: regs::PllControl1,
    /// PLL spread spectrum register.
    pll_ssr: u32,
    pll_acr: regs::PllAnalogControl,
    pll_updt: regs::PllUpdate,
    ckgr_mor: regs::MainOscillator,
    /// Main clock frequency register.
    ckgr_mcfr: u32,
    mckr: regs::MasterClock,

    _gap0: [u32; 0x03],

    /// USB clock register.
    usb: u32,

    _gap1: u32,

    /// Programmable clock registers.
    pck: [u32; 2],

    _gap2: [u32; 0x06],

    ier: u32,
    idr: u32,
    sr: regs::Status,
    imr: u32,

    _gap3: [u32; 0x06],

    pcr: regs::PeripheralControl,

    _gap4: [u32; 0x18],

    pll_ier: u32,
    pll_idr: u32,
    pll_isr0: regs::PllInterruptStatus0,
    pll_isr1: u32,
}

static_assertions::const_assert_eq!(core::mem::size_of::<Pmc>(), 0xFC);

impl Pmc {
    /// Create a new PMC MMIO instance at the fixed base address.
    ///
    /// # Safety
    ///
    /// This API can be used to create multiple handles to the same peripheral structure. The
    /// user must ensure that concurrent accesses do not interfere with each other.
    #[inline]
    pub const unsafe fn new_mmio_fixed() -> MmioPmc<'static> {
        unsafe { Pmc::new_mmio_at(PMC_BASE_ADDR) }
    }
}
