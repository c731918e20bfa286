use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::constants::{
    ESCALATE_CRITICAL_DAYS, ESCALATE_ELEVATED_DAYS, ESCALATE_NORMAL_DAYS,
};
use crate::analysis::Severity;
use crate::models::Nutrient;

/// Escalation tier for a persistent deficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InterventionLevel {
    Normal,
    Elevated,
    Critical,
}

/// Level for a run of consecutive deficient days.
///
/// Days 1-2 return `None`: the streak is tracked but no intervention is
/// surfaced yet.
pub fn level_for_days(consecutive_days: u32) -> Option<InterventionLevel> {
    if consecutive_days >= ESCALATE_CRITICAL_DAYS {
        Some(InterventionLevel::Critical)
    } else if consecutive_days >= ESCALATE_ELEVATED_DAYS {
        Some(InterventionLevel::Elevated)
    } else if consecutive_days >= ESCALATE_NORMAL_DAYS {
        Some(InterventionLevel::Normal)
    } else {
        None
    }
}

/// Tracked deficiency streak for one (user, nutrient) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionRecord {
    pub user_id: u64,
    pub nutrient: Nutrient,
    pub consecutive_days: u32,
    pub last_evaluated: NaiveDate,
    pub acknowledged: bool,
    /// Whether a CRITICAL notification has been delivered. Monotonic: once
    /// true it never goes back to false.
    pub notified: bool,
    pub created_at: NaiveDateTime,
}

impl InterventionRecord {
    pub fn level(&self) -> Option<InterventionLevel> {
        level_for_days(self.consecutive_days)
    }

    /// User-facing alert text for the current level.
    pub fn message(&self) -> String {
        let name = self.nutrient.display_name();
        match self.level() {
            Some(InterventionLevel::Critical) => format!(
                "URGENT: your {} intake has been critically low for {} days. \
                 We strongly recommend talking to a doctor or nutritionist.",
                name, self.consecutive_days
            ),
            Some(InterventionLevel::Elevated) => format!(
                "Your {} intake has been low for {} days. This is becoming a pattern; \
                 see the recommended foods below.",
                name, self.consecutive_days
            ),
            Some(InterventionLevel::Normal) => format!(
                "We've noticed you've been low on {} for {} days. \
                 Try adding some of the recommended foods to your meals.",
                name, self.consecutive_days
            ),
            None => format!("Monitoring {} intake.", name),
        }
    }
}

/// A record whose deficiency cleared, kept for history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedIntervention {
    pub record: InterventionRecord,
    pub resolved_on: NaiveDate,
}

/// Outcome of one daily evaluation for a (user, nutrient) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// This date was already processed; nothing changed.
    AlreadyEvaluated,
    /// Not deficient and no streak to resolve.
    NotDeficient,
    /// An active streak ended because intake recovered.
    Resolved,
    /// Streak tracked; the surfaced level, if any.
    Tracked(Option<InterventionLevel>),
}

/// External notification seam.
///
/// Must not fail the daily batch: `false` means the dispatch did not go out
/// and will be retried on the next daily run.
pub trait NotificationDispatcher {
    fn notify(&mut self, user_id: u64, record: &InterventionRecord) -> bool;
}

/// Dispatcher that only logs the alert. Stands in for email delivery.
pub struct LogDispatcher;

impl NotificationDispatcher for LogDispatcher {
    fn notify(&mut self, user_id: u64, record: &InterventionRecord) -> bool {
        info!(
            user_id,
            nutrient = record.nutrient.display_name(),
            days = record.consecutive_days,
            "critical deficiency notification"
        );
        true
    }
}

/// Day-by-day escalation engine, keyed by (user, nutrient).
///
/// The only stateful part of the analysis core. Each pair is evaluated at
/// most once per calendar date; re-runs for an already-evaluated date are
/// no-ops. Callers must evaluate one user's nutrients sequentially (holding
/// `&mut self` enforces that here).
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InterventionTracker {
    active: Vec<InterventionRecord>,
    resolved: Vec<ResolvedIntervention>,
}

impl InterventionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active record for a pair, if any.
    pub fn get(&self, user_id: u64, nutrient: Nutrient) -> Option<&InterventionRecord> {
        self.active
            .iter()
            .find(|r| r.user_id == user_id && r.nutrient == nutrient)
    }

    /// Records currently surfaced to a user (streak of 3+ days).
    pub fn surfaced_for(&self, user_id: u64) -> Vec<&InterventionRecord> {
        self.active
            .iter()
            .filter(|r| r.user_id == user_id && r.level().is_some())
            .collect()
    }

    pub fn resolved_history(&self) -> &[ResolvedIntervention] {
        &self.resolved
    }

    /// Consume one day's severity for a (user, nutrient) pair.
    pub fn evaluate_day(
        &mut self,
        user_id: u64,
        nutrient: Nutrient,
        severity: Severity,
        date: NaiveDate,
        now: NaiveDateTime,
        dispatcher: &mut dyn NotificationDispatcher,
    ) -> Evaluation {
        let position = self
            .active
            .iter()
            .position(|r| r.user_id == user_id && r.nutrient == nutrient);

        let Some(position) = position else {
            if !severity.is_deficient() {
                return Evaluation::NotDeficient;
            }
            self.active.push(InterventionRecord {
                user_id,
                nutrient,
                consecutive_days: 1,
                last_evaluated: date,
                acknowledged: false,
                notified: false,
                created_at: now,
            });
            return Evaluation::Tracked(None);
        };

        let record = &mut self.active[position];

        // Duplicate same-day batch invocation.
        if record.last_evaluated == date {
            debug!(
                user_id,
                nutrient = nutrient.display_name(),
                %date,
                "already evaluated for this date, skipping"
            );
            return Evaluation::AlreadyEvaluated;
        }

        // Intake recovered: close the streak instead of leaving it dangling.
        if !severity.is_deficient() {
            let mut record = self.active.swap_remove(position);
            record.consecutive_days = 0;
            record.last_evaluated = date;
            self.resolved.push(ResolvedIntervention {
                record,
                resolved_on: date,
            });
            return Evaluation::Resolved;
        }

        let yesterday = date.checked_sub_days(Days::new(1));
        if yesterday == Some(record.last_evaluated) {
            record.consecutive_days += 1;
        } else {
            // Gap of more than one day: the streak restarts from scratch.
            record.consecutive_days = 1;
            record.created_at = now;
            record.acknowledged = false;
            record.notified = false;
        }
        record.last_evaluated = date;

        let level = record.level();
        if level == Some(InterventionLevel::Critical) && !record.notified {
            if dispatcher.notify(user_id, record) {
                record.notified = true;
            } else {
                warn!(
                    user_id,
                    nutrient = nutrient.display_name(),
                    "notification dispatch failed, will retry on next daily run"
                );
            }
        }

        Evaluation::Tracked(level)
    }

    /// Mark a surfaced intervention as seen by the user.
    pub fn acknowledge(&mut self, user_id: u64, nutrient: Nutrient) -> bool {
        match self
            .active
            .iter_mut()
            .find(|r| r.user_id == user_id && r.nutrient == nutrient)
        {
            Some(record) => {
                record.acknowledged = true;
                true
            }
            None => false,
        }
    }

    /// Drop all records owned by a user (both active and history).
    pub fn remove_user(&mut self, user_id: u64) {
        self.active.retain(|r| r.user_id != user_id);
        self.resolved.retain(|r| r.record.user_id != user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recording {
        calls: usize,
        succeed: bool,
    }

    impl NotificationDispatcher for Recording {
        fn notify(&mut self, _user_id: u64, _record: &InterventionRecord) -> bool {
            self.calls += 1;
            self.succeed
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, day).unwrap()
    }

    fn now() -> NaiveDateTime {
        date(1).and_hms_opt(6, 0, 0).unwrap()
    }

    #[test]
    fn test_level_ladder() {
        let expected = [None, None, Some(InterventionLevel::Normal), Some(InterventionLevel::Normal),
            Some(InterventionLevel::Elevated), Some(InterventionLevel::Elevated),
            Some(InterventionLevel::Critical)];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(level_for_days(i as u32 + 1), *want, "day {}", i + 1);
        }
        assert_eq!(level_for_days(30), Some(InterventionLevel::Critical));
    }

    #[test]
    fn test_escalation_over_consecutive_days() {
        let mut tracker = InterventionTracker::new();
        let mut dispatcher = Recording { calls: 0, succeed: true };

        for day in 1..=7 {
            let outcome = tracker.evaluate_day(
                1,
                Nutrient::Iron,
                Severity::Severe,
                date(day),
                now(),
                &mut dispatcher,
            );
            let record = tracker.get(1, Nutrient::Iron).unwrap();
            assert_eq!(record.consecutive_days, day);
            assert_eq!(outcome, Evaluation::Tracked(level_for_days(day)));
        }

        // Notification fired exactly once, on the transition into CRITICAL.
        assert_eq!(dispatcher.calls, 1);
        assert!(tracker.get(1, Nutrient::Iron).unwrap().notified);

        // Day 8: still critical, but no second notification.
        tracker.evaluate_day(1, Nutrient::Iron, Severity::Severe, date(8), now(), &mut dispatcher);
        assert_eq!(dispatcher.calls, 1);
    }

    #[test]
    fn test_recovery_resolves_record() {
        let mut tracker = InterventionTracker::new();
        let mut dispatcher = Recording { calls: 0, succeed: true };

        for day in 1..=4 {
            tracker.evaluate_day(1, Nutrient::Calcium, Severity::Moderate, date(day), now(), &mut dispatcher);
        }
        assert!(tracker.get(1, Nutrient::Calcium).is_some());

        // MILD is above the intervention threshold and resolves the streak.
        let outcome = tracker.evaluate_day(
            1,
            Nutrient::Calcium,
            Severity::Mild,
            date(5),
            now(),
            &mut dispatcher,
        );
        assert_eq!(outcome, Evaluation::Resolved);
        assert!(tracker.get(1, Nutrient::Calcium).is_none());

        let resolved = &tracker.resolved_history()[0];
        assert_eq!(resolved.record.consecutive_days, 0);
        assert_eq!(resolved.resolved_on, date(5));
    }

    #[test]
    fn test_gap_restarts_streak() {
        let mut tracker = InterventionTracker::new();
        let mut dispatcher = Recording { calls: 0, succeed: true };

        tracker.evaluate_day(1, Nutrient::Protein, Severity::Severe, date(1), now(), &mut dispatcher);
        tracker.evaluate_day(1, Nutrient::Protein, Severity::Severe, date(2), now(), &mut dispatcher);

        // Two days with no evaluation, then deficient again.
        tracker.evaluate_day(1, Nutrient::Protein, Severity::Severe, date(5), now(), &mut dispatcher);
        assert_eq!(tracker.get(1, Nutrient::Protein).unwrap().consecutive_days, 1);
    }

    #[test]
    fn test_same_day_rerun_is_noop() {
        let mut tracker = InterventionTracker::new();
        let mut dispatcher = Recording { calls: 0, succeed: true };

        tracker.evaluate_day(1, Nutrient::Zinc, Severity::Severe, date(1), now(), &mut dispatcher);
        let before = tracker.get(1, Nutrient::Zinc).unwrap().clone();

        let outcome = tracker.evaluate_day(
            1,
            Nutrient::Zinc,
            Severity::Severe,
            date(1),
            now(),
            &mut dispatcher,
        );
        assert_eq!(outcome, Evaluation::AlreadyEvaluated);

        let after = tracker.get(1, Nutrient::Zinc).unwrap();
        assert_eq!(after.consecutive_days, before.consecutive_days);
        assert_eq!(after.notified, before.notified);
    }

    #[test]
    fn test_notification_failure_retries_next_day() {
        let mut tracker = InterventionTracker::new();
        let mut failing = Recording { calls: 0, succeed: false };

        for day in 1..=7 {
            tracker.evaluate_day(1, Nutrient::VitaminD, Severity::Severe, date(day), now(), &mut failing);
        }
        assert_eq!(failing.calls, 1);
        assert!(!tracker.get(1, Nutrient::VitaminD).unwrap().notified);

        // Dispatch recovers: day 8 retries and succeeds.
        let mut working = Recording { calls: 0, succeed: true };
        tracker.evaluate_day(1, Nutrient::VitaminD, Severity::Severe, date(8), now(), &mut working);
        assert_eq!(working.calls, 1);
        assert!(tracker.get(1, Nutrient::VitaminD).unwrap().notified);
    }

    #[test]
    fn test_day_one_and_two_not_surfaced() {
        let mut tracker = InterventionTracker::new();
        let mut dispatcher = Recording { calls: 0, succeed: true };

        tracker.evaluate_day(1, Nutrient::Fiber, Severity::Moderate, date(1), now(), &mut dispatcher);
        tracker.evaluate_day(1, Nutrient::Fiber, Severity::Moderate, date(2), now(), &mut dispatcher);
        assert!(tracker.surfaced_for(1).is_empty());

        tracker.evaluate_day(1, Nutrient::Fiber, Severity::Moderate, date(3), now(), &mut dispatcher);
        let surfaced = tracker.surfaced_for(1);
        assert_eq!(surfaced.len(), 1);
        assert_eq!(surfaced[0].level(), Some(InterventionLevel::Normal));
    }

    #[test]
    fn test_not_deficient_without_record() {
        let mut tracker = InterventionTracker::new();
        let mut dispatcher = Recording { calls: 0, succeed: true };

        let outcome = tracker.evaluate_day(
            1,
            Nutrient::Magnesium,
            Severity::None,
            date(1),
            now(),
            &mut dispatcher,
        );
        assert_eq!(outcome, Evaluation::NotDeficient);
        assert!(tracker.get(1, Nutrient::Magnesium).is_none());
    }

    #[test]
    fn test_acknowledge_marks_record() {
        let mut tracker = InterventionTracker::new();
        let mut dispatcher = Recording { calls: 0, succeed: true };

        tracker.evaluate_day(1, Nutrient::Iron, Severity::Severe, date(1), now(), &mut dispatcher);
        assert!(tracker.acknowledge(1, Nutrient::Iron));
        assert!(tracker.get(1, Nutrient::Iron).unwrap().acknowledged);
        assert!(!tracker.acknowledge(1, Nutrient::Calcium));
    }

    #[test]
    fn test_remove_user_drops_records() {
        let mut tracker = InterventionTracker::new();
        let mut dispatcher = Recording { calls: 0, succeed: true };

        tracker.evaluate_day(1, Nutrient::Iron, Severity::Severe, date(1), now(), &mut dispatcher);
        tracker.evaluate_day(2, Nutrient::Iron, Severity::Severe, date(1), now(), &mut dispatcher);

        tracker.remove_user(1);
        assert!(tracker.get(1, Nutrient::Iron).is_none());
        assert!(tracker.get(2, Nutrient::Iron).is_some());
    }
}
