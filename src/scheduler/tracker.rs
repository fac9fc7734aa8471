use std::collections::HashSet;

use chrono::NaiveDate;

/// Per-day bookkeeping of which (group, deal) pairs have already been
/// posted. Process-local only; a restart re-opens everything.
pub struct PostTracker {
    posted: HashSet<(i32, i32)>,
    last_reset: NaiveDate,
}

impl PostTracker {
    pub fn new(today: NaiveDate) -> Self {
        PostTracker {
            posted: HashSet::new(),
            last_reset: today,
        }
    }

    /// Clears the set when the calendar day has changed since the last
    /// reset. Returns whether a reset happened.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if today == self.last_reset {
            return false;
        }
        self.posted.clear();
        self.last_reset = today;
        true
    }

    pub fn is_posted(&self, group_id: i32, deal_id: i32) -> bool {
        self.posted.contains(&(group_id, deal_id))
    }

    pub fn mark_posted(&mut self, group_id: i32, deal_id: i32) {
        self.posted.insert((group_id, deal_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn marks_are_visible_within_the_day() {
        let mut tracker = PostTracker::new(day("2024-06-01"));
        assert!(!tracker.is_posted(1, 7));
        tracker.mark_posted(1, 7);
        assert!(tracker.is_posted(1, 7));
        // Other groups are unaffected.
        assert!(!tracker.is_posted(2, 7));
    }

    #[test]
    fn same_day_roll_over_is_a_no_op() {
        let mut tracker = PostTracker::new(day("2024-06-01"));
        tracker.mark_posted(1, 7);
        assert!(!tracker.roll_over(day("2024-06-01")));
        assert!(tracker.is_posted(1, 7));
    }

    #[test]
    fn day_change_clears_the_set() {
        let mut tracker = PostTracker::new(day("2024-06-01"));
        tracker.mark_posted(1, 7);
        assert!(tracker.roll_over(day("2024-06-02")));
        assert!(!tracker.is_posted(1, 7));
    }
}
