//! DDR2 timing table for the on-board W972GG6KB device.
//!
//! One 16-bit, 8-bank, 2 Gbit DDR2 die on EBI chip select 1. All cycle counts are derived
//! from the device datasheet at the 200 MHz controller clock. The raw register values are
//! checked at compile time below.
use arbitrary_int::{u3, u4, u7, u12};
use sam9x60::mpddrc::regs::{
    BankCount, BusWidth, ColumnBits, Configuration, DecodingScheme, DriveStrength,
    MemoryDevice, MemoryDeviceRegister, RefreshTimer, RowBits, TimingParameter0,
    TimingParameter1, TimingParameter2,
};
use sam9x60_hal::ddr::MpddrcConfigSet;

pub const MPDDRC_CONFIG: MpddrcConfigSet = MpddrcConfigSet {
    md: MemoryDeviceRegister::builder()
        .with_md(MemoryDevice::Ddr2)
        .with_dbw(BusWidth::SixteenBits)
        .build(),
    cr: Configuration::builder()
        .with_nc(ColumnBits::Col10)
        .with_nr(RowBits::Row14)
        .with_cas(u3::new(3))
        .with_dll_reset(false)
        .with_dic_ds(DriveStrength::Weak)
        .with_dis_dll(false)
        .with_ocd(u3::new(0))
        .with_nb(BankCount::Eight)
        .with_ndqs(false)
        .with_decod(DecodingScheme::Interleaved)
        .with_unal(true)
        .build(),
    rtr: RefreshTimer::builder().with_count(u12::new(0x30E)).build(),
    tpr0: TimingParameter0::builder()
        .with_tras(u4::new(8))
        .with_trcd(u4::new(3))
        .with_twr(u4::new(3))
        .with_trc(u4::new(11))
        .with_trp(u4::new(3))
        .with_trrd(u4::new(2))
        .with_twtr(u3::new(2))
        .with_tmrd(u4::new(2))
        .build(),
    tpr1: TimingParameter1::builder()
        .with_trfc(u7::new(26))
        .with_txsnr(28)
        .with_txsrd(200)
        .with_txp(u4::new(2))
        .build(),
    tpr2: TimingParameter2::builder()
        .with_txard(u4::new(8))
        .with_txards(u4::new(2))
        .with_trpa(u4::new(3))
        .with_trtp(u3::new(2))
        .with_tfaw(u4::new(7))
        .build(),
};

static_assertions::const_assert_eq!(MPDDRC_CONFIG.md.raw_value(), 0x0000_0016);
static_assertions::const_assert_eq!(MPDDRC_CONFIG.cr.raw_value(), 0x00D0_013D);
static_assertions::const_assert_eq!(MPDDRC_CONFIG.rtr.raw_value(), 0x0000_030E);
static_assertions::const_assert_eq!(MPDDRC_CONFIG.tpr0.raw_value(), 0x2223_B338);
static_assertions::const_assert_eq!(MPDDRC_CONFIG.tpr1.raw_value(), 0x02C8_1C1A);
static_assertions::const_assert_eq!(MPDDRC_CONFIG.tpr2.raw_value(), 0x0007_2328);
