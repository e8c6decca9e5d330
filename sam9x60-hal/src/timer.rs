//! # Periodic interval timer (PIT) module.
use arbitrary_int::u20;
use sam9x60::pit::{MmioPit, Mode};

/// Maximum counter period.
pub const MAX_PERIOD: u32 = (1 << 20) - 1;

/// Free-running timer used as the tick source of the boot stages.
pub struct Pit {
    regs: MmioPit<'static>,
}

impl Pit {
    /// Start the timer with the maximum period. The counter wraps roughly every 84 ms at a
    /// 200 MHz master clock (the counter runs on MCK / 16).
    pub fn start_free_running(mut regs: MmioPit<'static>) -> Self {
        let mut mr = Mode::new_with_raw_value(0);
        mr.set_piv(u20::new(MAX_PERIOD));
        mr.set_piten(true);
        regs.write_mr(mr);
        Self { regs }
    }

    /// Current counter value. Does not reset the wrap counter.
    #[inline]
    pub fn value(&mut self) -> u32 {
        self.regs.read_piir().cpiv().value()
    }

    /// Number of counter wraps since the last value register read.
    #[inline]
    pub fn wrap_count(&mut self) -> u16 {
        self.regs.read_piir().picnt().value()
    }

    /// Release the register block.
    pub fn release(self) -> MmioPit<'static> {
        self.regs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::MaybeUninit;
    use sam9x60::pit::Pit as PitBlock;

    #[test]
    fn test_free_running_start() {
        let mut block = MaybeUninit::<PitBlock>::zeroed();
        let regs = unsafe { PitBlock::new_mmio_at(block.as_mut_ptr() as usize) };
        let mut timer = Pit::start_free_running(regs);
        assert_eq!(timer.value(), 0);
        assert_eq!(timer.wrap_count(), 0);
        let mr = timer.release().read_mr();
        assert!(mr.piten());
        assert!(!mr.pitien());
        assert_eq!(mr.piv().value(), MAX_PERIOD);
    }
}
