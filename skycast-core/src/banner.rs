use std::time::{Duration, Instant};

/// How long a banner stays fully visible.
pub const HIDE_AFTER: Duration = Duration::from_millis(4000);
/// Total lifetime; past this the banner is dropped by its owner.
pub const CLEAR_AFTER: Duration = Duration::from_millis(5000);

/// A transient error notice with a show, hide, clear lifecycle.
///
/// The banner never dismisses itself; it reports a phase relative to the
/// instant it was raised, and the owner drops it once expired. Raising a
/// replacement stamps a fresh instant, so the clock restarts instead of
/// inheriting the old deadline.
#[derive(Debug, Clone)]
pub struct Banner {
    message: String,
    raised_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPhase {
    /// Fully shown, the first 4 s.
    Visible,
    /// Still present but dimmed, between 4 s and 5 s.
    Hiding,
    /// Past 5 s; to be dropped.
    Expired,
}

impl Banner {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), raised_at: Instant::now() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phase(&self) -> BannerPhase {
        self.phase_at(Instant::now())
    }

    /// Phase as of `now`. Pure in `now`, so the lifecycle is testable
    /// without waiting on real timers.
    pub fn phase_at(&self, now: Instant) -> BannerPhase {
        let elapsed = now.saturating_duration_since(self.raised_at);

        if elapsed >= CLEAR_AFTER {
            BannerPhase::Expired
        } else if elapsed >= HIDE_AFTER {
            BannerPhase::Hiding
        } else {
            BannerPhase::Visible
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_banner_is_visible() {
        let banner = Banner::new("City not found");
        assert_eq!(banner.phase(), BannerPhase::Visible);
        assert_eq!(banner.message(), "City not found");
    }

    #[test]
    fn phase_transitions_at_four_and_five_seconds() {
        let banner = Banner::new("oops");
        let now = Instant::now();

        assert_eq!(banner.phase_at(now + Duration::from_millis(3_900)), BannerPhase::Visible);
        assert_eq!(banner.phase_at(now + Duration::from_millis(4_100)), BannerPhase::Hiding);
        assert_eq!(banner.phase_at(now + Duration::from_millis(4_900)), BannerPhase::Hiding);
        assert_eq!(banner.phase_at(now + Duration::from_millis(5_100)), BannerPhase::Expired);
    }

    #[test]
    fn probing_before_raise_reads_visible() {
        let now = Instant::now();
        let banner = Banner::new("oops");

        // saturating elapsed keeps an earlier probe in the first phase
        assert_eq!(banner.phase_at(now), BannerPhase::Visible);
    }

    #[test]
    fn phase_follows_the_banner_own_age() {
        // Phase is a function of the banner's own age alone. A banner
        // that replaces another one at its 2s mark therefore reads
        // Visible at wall-clock 4.2s, where the replaced banner would
        // already have been hiding.
        let banner = Banner::new("second error");
        let now = Instant::now();

        assert_eq!(banner.phase_at(now + Duration::from_millis(2_200)), BannerPhase::Visible);
        assert_eq!(banner.phase_at(now + Duration::from_millis(4_200)), BannerPhase::Hiding);
    }
}
