use std::collections::HashMap;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::analysis::{build_report, classify, percentage, personalized_rda, AnalysisWindow};
use crate::analysis::{aggregate, Severity};
use crate::charts::{build_chart_data, ChartData};
use crate::error::{Result, TrackerError};
use crate::intervention::{InterventionRecord, InterventionTracker, NotificationDispatcher};
use crate::models::{
    AnalysisReport, BodyProfile, ConsumptionEntry, FoodItem, MealSlot, Nutrient,
};
use crate::state::{ConsumptionLog, FoodCatalog, UserProfileStore};

/// A tracked user and their optional body profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub body: Option<BodyProfile>,
}

/// In-memory application state: users, food catalog, consumption log, and
/// the intervention tracker.
///
/// Implements the collaborator seams ([`FoodCatalog`], [`ConsumptionLog`],
/// [`UserProfileStore`]) the analysis engine is written against.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TrackerState {
    users: HashMap<u64, UserRecord>,
    foods: HashMap<u64, FoodItem>,
    entries: Vec<ConsumptionEntry>,
    tracker: InterventionTracker,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, user: UserRecord) {
        self.users.insert(user.id, user);
    }

    pub fn user(&self, user_id: u64) -> Option<&UserRecord> {
        self.users.get(&user_id)
    }

    pub fn user_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.users.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn add_food(&mut self, food: FoodItem) {
        self.foods.insert(food.id, food);
    }

    pub fn foods(&self) -> impl Iterator<Item = &FoodItem> {
        self.foods.values()
    }

    pub fn next_food_id(&self) -> u64 {
        self.foods.keys().max().copied().unwrap_or(0) + 1
    }

    pub fn food_count(&self) -> usize {
        self.foods.len()
    }

    pub fn tracker(&self) -> &InterventionTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut InterventionTracker {
        &mut self.tracker
    }

    /// Log a consumption entry, stamping it at the call site.
    ///
    /// The entry is immutable once logged. Fails when the user is unknown or
    /// the portion is not positive; an unknown food is allowed (analysis will
    /// skip it) but a missing catalog entry usually signals a typo, so the
    /// interactive prompt resolves foods before calling this.
    pub fn log_entry(
        &mut self,
        user_id: u64,
        food_id: u64,
        portion: f64,
        consumed_at: NaiveDateTime,
        meal_slot: Option<MealSlot>,
    ) -> Result<()> {
        if !self.users.contains_key(&user_id) {
            return Err(TrackerError::UserNotFound(user_id));
        }
        if portion <= 0.0 {
            return Err(TrackerError::InvalidInput(format!(
                "portion must be positive, got {}",
                portion
            )));
        }

        self.entries.push(ConsumptionEntry {
            user_id,
            food_id,
            portion,
            consumed_at,
            meal_slot,
        });
        Ok(())
    }

    /// Delete a user and everything they own: consumption entries and
    /// intervention records go with the user in one call.
    pub fn remove_user(&mut self, user_id: u64) -> Result<()> {
        if self.users.remove(&user_id).is_none() {
            return Err(TrackerError::UserNotFound(user_id));
        }
        self.entries.retain(|e| e.user_id != user_id);
        self.tracker.remove_user(user_id);
        Ok(())
    }

    /// Analysis report for a single calendar day.
    pub fn analyze_day(&self, user_id: u64, date: NaiveDate) -> Result<AnalysisReport> {
        let user = self.user(user_id).ok_or(TrackerError::UserNotFound(user_id))?;
        let entries = self.entries_on(user_id, date);
        Ok(build_report(
            &entries,
            self,
            user.body.as_ref(),
            AnalysisWindow::Today,
        ))
    }

    /// Analysis report for the 7-day window ending on `end_date`, averaged
    /// over distinct active days.
    pub fn analyze_week(&self, user_id: u64, end_date: NaiveDate) -> Result<AnalysisReport> {
        let user = self.user(user_id).ok_or(TrackerError::UserNotFound(user_id))?;
        let entries = self.entries_in_window(user_id, end_date, 7);
        Ok(build_report(
            &entries,
            self,
            user.body.as_ref(),
            AnalysisWindow::MultiDay,
        ))
    }

    /// Chart views for the `days`-long window ending on `end_date`.
    pub fn chart_data(&self, user_id: u64, end_date: NaiveDate, days: u32) -> Result<ChartData> {
        if !self.users.contains_key(&user_id) {
            return Err(TrackerError::UserNotFound(user_id));
        }
        let entries = self.entries_in_window(user_id, end_date, days);
        Ok(build_chart_data(&entries, self, end_date, days))
    }

    /// Advance every user's intervention tracker for one calendar date.
    ///
    /// Users are processed independently; a single user's nutrients are
    /// evaluated strictly in order. Safe to re-run for the same date: pairs
    /// already evaluated are no-ops. Returns the surfaced records after the
    /// run.
    pub fn run_daily_batch(
        &mut self,
        date: NaiveDate,
        now: NaiveDateTime,
        dispatcher: &mut dyn NotificationDispatcher,
    ) -> Vec<InterventionRecord> {
        // Phase 1: classify the day's intake for every (user, nutrient).
        let mut severities: Vec<(u64, Nutrient, Severity)> = Vec::new();
        for user_id in self.user_ids() {
            let entries = self.entries_on(user_id, date);
            let totals = aggregate(&entries, self);
            let rda = personalized_rda(self.body_profile(user_id));

            for nutrient in Nutrient::MACROS.iter().chain(Nutrient::MICROS.iter()) {
                let pct = percentage(totals.amounts.get(*nutrient), rda.get(*nutrient));
                severities.push((user_id, *nutrient, classify(pct)));
            }
        }

        // Phase 2: feed the tracker, nutrient by nutrient.
        for (user_id, nutrient, severity) in severities {
            self.tracker
                .evaluate_day(user_id, nutrient, severity, date, now, dispatcher);
        }

        let mut surfaced = Vec::new();
        for user_id in self.user_ids() {
            surfaced.extend(self.tracker.surfaced_for(user_id).into_iter().cloned());
        }
        surfaced
    }

    fn entries_on(&self, user_id: u64, date: NaiveDate) -> Vec<ConsumptionEntry> {
        self.entries
            .iter()
            .filter(|e| e.user_id == user_id && e.consumed_date() == date)
            .cloned()
            .collect()
    }

    fn entries_in_window(&self, user_id: u64, end_date: NaiveDate, days: u32) -> Vec<ConsumptionEntry> {
        let start = end_date
            .checked_sub_days(Days::new(days.saturating_sub(1) as u64))
            .unwrap_or(end_date);
        let start_at = start.and_time(NaiveTime::MIN);
        let end_at = end_date
            .checked_add_days(Days::new(1))
            .unwrap_or(end_date)
            .and_time(NaiveTime::MIN);
        self.query(user_id, start_at, end_at)
    }
}

impl FoodCatalog for TrackerState {
    fn lookup(&self, food_id: u64) -> Option<&FoodItem> {
        self.foods.get(&food_id)
    }

    fn find_by_name(&self, name: &str) -> Option<&FoodItem> {
        self.foods
            .values()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }
}

impl ConsumptionLog for TrackerState {
    fn query(&self, user_id: u64, start: NaiveDateTime, end: NaiveDateTime) -> Vec<ConsumptionEntry> {
        let mut entries: Vec<ConsumptionEntry> = self
            .entries
            .iter()
            .filter(|e| e.user_id == user_id && e.consumed_at >= start && e.consumed_at < end)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.consumed_at);
        entries
    }
}

impl UserProfileStore for TrackerState {
    fn body_profile(&self, user_id: u64) -> Option<&BodyProfile> {
        self.users.get(&user_id).and_then(|u| u.body.as_ref())
    }
}
