use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Per-key one-shot deadlines for the `hit` flash.
///
/// Scheduling a key that already has a pending deadline replaces it, which
/// cancels the earlier clear.
#[derive(Clone, Debug)]
pub struct FlashSchedule {
    duration: Duration,
    deadlines: HashMap<String, Instant>,
}

impl FlashSchedule {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            deadlines: HashMap::new(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn schedule(&mut self, id: &str, now: Instant) {
        self.deadlines.insert(id.to_string(), now + self.duration);
    }

    pub fn cancel(&mut self, id: &str) -> bool {
        self.deadlines.remove(id).is_some()
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.deadlines.contains_key(id)
    }

    /// Remove and return every key whose deadline is at or before `now`.
    pub fn expire(&mut self, now: Instant) -> Vec<String> {
        let mut expired: Vec<String> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, _)| id.clone())
            .collect();
        expired.sort();
        for id in &expired {
            self.deadlines.remove(id);
        }
        expired
    }

    pub fn pending_count(&self) -> usize {
        self.deadlines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expire_after_duration() {
        let start = Instant::now();
        let mut flash = FlashSchedule::new(Duration::from_millis(150));
        flash.schedule("Q", start);

        assert!(flash.expire(start + Duration::from_millis(100)).is_empty());
        assert_eq!(flash.expire(start + Duration::from_millis(150)), vec!["Q".to_string()]);
        assert_eq!(flash.pending_count(), 0);
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let start = Instant::now();
        let mut flash = FlashSchedule::new(Duration::from_millis(150));
        flash.schedule("Q", start);
        flash.schedule("Q", start + Duration::from_millis(100));

        // The first deadline was cancelled by the second press
        assert!(flash.expire(start + Duration::from_millis(200)).is_empty());
        assert!(flash.is_pending("Q"));
        assert_eq!(flash.expire(start + Duration::from_millis(250)), vec!["Q".to_string()]);
    }

    #[test]
    fn test_independent_keys() {
        let start = Instant::now();
        let mut flash = FlashSchedule::new(Duration::from_millis(100));
        flash.schedule("W", start);
        flash.schedule("E", start + Duration::from_millis(50));

        assert_eq!(flash.expire(start + Duration::from_millis(120)), vec!["W".to_string()]);
        assert!(flash.cancel("E"));
        assert!(!flash.cancel("E"));
        assert_eq!(flash.pending_count(), 0);
    }
}
