//! # Watchdog timer module.
use sam9x60::wdt::MmioWdt;

/// Disable the watchdog.
///
/// The mode register can only be written once after reset, so this must be the first write to
/// it and no other watchdog configuration is possible afterwards.
pub fn disable(wdt: &mut MmioWdt<'static>) {
    wdt.modify_mr(|mut val| {
        val.set_wddis(true);
        val
    });
}
