use std::time::Duration;

use crate::game::GameConfig;

/// Tick interval that tightens each time the snake eats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    current: Duration,
    initial: Duration,
    min: Duration,
    step: Duration,
}

impl Pace {
    pub fn new(initial: Duration, min: Duration, step: Duration) -> Self {
        Self {
            current: initial,
            initial,
            min,
            step,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            Duration::from_millis(config.initial_tick_ms),
            Duration::from_millis(config.min_tick_ms),
            Duration::from_millis(config.tick_step_ms),
        )
    }

    pub fn interval(&self) -> Duration {
        self.current
    }

    /// Speed up by one step. Returns false once the floor was already reached.
    pub fn speed_up(&mut self) -> bool {
        let next = self.current.saturating_sub(self.step).max(self.min);
        let changed = next != self.current;
        self.current = next;
        changed
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_config() {
        let pace = Pace::from_config(&GameConfig::default());
        assert_eq!(pace.interval(), Duration::from_millis(260));
    }

    #[test]
    fn test_speed_up_stops_at_floor() {
        let mut pace = Pace::new(
            Duration::from_millis(100),
            Duration::from_millis(75),
            Duration::from_millis(10),
        );

        assert!(pace.speed_up());
        assert_eq!(pace.interval(), Duration::from_millis(90));
        assert!(pace.speed_up());
        assert!(pace.speed_up());
        assert_eq!(pace.interval(), Duration::from_millis(75));
        assert!(!pace.speed_up());
        assert_eq!(pace.interval(), Duration::from_millis(75));

        pace.reset();
        assert_eq!(pace.interval(), Duration::from_millis(100));
    }
}
