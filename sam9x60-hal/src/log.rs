//! # Logger implementations.
pub mod dbgu_blocking {
    //! Blocking console logger writing through the [Dbgu] driver.
    use core::cell::UnsafeCell;
    use core::fmt::Write as _;
    use core::sync::atomic::{AtomicBool, Ordering};

    use crate::uart::Dbgu;

    struct Console(UnsafeCell<Option<Dbgu>>);

    // Safety: Access to the inner console is serialized through the logger spinlock.
    unsafe impl Sync for Console {}

    struct DbguLogger {
        locked: AtomicBool,
        console: Console,
    }

    static LOGGER: DbguLogger = DbguLogger {
        locked: AtomicBool::new(false),
        console: Console(UnsafeCell::new(None)),
    };

    impl log::Log for DbguLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            while self.locked.swap(true, Ordering::Acquire) {
                core::hint::spin_loop();
            }
            // Safety: The spinlock above serializes access to the cell.
            let installed = unsafe { (*self.console.0.get()).is_some() };
            self.locked.store(false, Ordering::Release);
            installed
        }

        fn log(&self, record: &log::Record) {
            while self.locked.swap(true, Ordering::Acquire) {
                core::hint::spin_loop();
            }
            // Safety: The spinlock above serializes access to the cell.
            if let Some(console) = unsafe { &mut *self.console.0.get() } {
                writeln!(console, "{} {}", record.level(), record.args()).ok();
            }
            self.locked.store(false, Ordering::Release);
        }

        fn flush(&self) {}
    }

    /// Install the blocking console logger.
    ///
    /// # Safety
    ///
    /// The console must stay valid for the rest of the program. This is intended to be called
    /// exactly once on a single core after the debug console was brought up.
    pub unsafe fn init_unsafe_single_core(console: Dbgu, level: log::LevelFilter) {
        while LOGGER.locked.swap(true, Ordering::Acquire) {
            core::hint::spin_loop();
        }
        // Safety: The spinlock above serializes access to the cell.
        unsafe { *LOGGER.console.0.get() = Some(console) };
        LOGGER.locked.store(false, Ordering::Release);
        log::set_logger(&LOGGER).ok();
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::MaybeUninit;
    use log::Log as _;
    use sam9x60::dbgu::{Dbgu as DbguBlock, Status};
    use std::boxed::Box;

    use crate::time::Hertz;
    use crate::uart::{ClockConfig, Dbgu};

    #[test]
    fn test_install_and_log() {
        // The logger keeps the console for the rest of the program, so the simulated block
        // must live that long as well.
        let block: &'static mut MaybeUninit<DbguBlock> = Box::leak(Box::new(MaybeUninit::zeroed()));
        let mut regs = unsafe { DbguBlock::new_mmio_at(block.as_mut_ptr() as usize) };
        let mut sr = Status::new_with_raw_value(0);
        sr.set_txrdy(true);
        sr.set_txempty(true);
        regs.write_sr(sr);

        let cfg = ClockConfig::new_autocalc_with_error(Hertz::from_raw(200_000_000), 115_200)
            .unwrap()
            .0;
        let console = Dbgu::new(regs, cfg);
        unsafe { dbgu_blocking::init_unsafe_single_core(console, log::LevelFilter::Debug) };
        log::info!("console logger installed");
        log::logger().flush();
    }
}
