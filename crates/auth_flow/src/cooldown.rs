//! Resend cooldown for one-time codes. The resend control stays disabled
//! while the counter is nonzero; the UI ticks it once per second.

pub const RESEND_COOLDOWN_SECS: u32 = 60;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResendCooldown {
    remaining: u32,
}

impl ResendCooldown {
    pub fn start(&mut self) {
        self.remaining = RESEND_COOLDOWN_SECS;
    }

    /// One-second tick. Saturates at zero.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn reset(&mut self) {
        self.remaining = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_sixty_and_counts_down_to_zero() {
        let mut cooldown = ResendCooldown::default();
        assert!(!cooldown.is_active());

        cooldown.start();
        assert_eq!(cooldown.remaining(), 60);
        assert!(cooldown.is_active());

        for expected in (0..60).rev() {
            assert_eq!(cooldown.tick(), expected);
        }
        assert!(!cooldown.is_active());

        // further ticks stay at zero
        assert_eq!(cooldown.tick(), 0);
    }

    #[test]
    fn restart_resets_the_full_window() {
        let mut cooldown = ResendCooldown::default();
        cooldown.start();
        for _ in 0..50 {
            cooldown.tick();
        }
        cooldown.start();
        assert_eq!(cooldown.remaining(), 60);
    }
}
