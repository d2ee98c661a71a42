//! Kid checklist screen state.
//!
//! # Responsibility
//! - Track the selected kid and derive their assigned chores with progress.
//! - Record increments and aggregate stars against the reward goal.
//! - Drive the transient "just completed" highlight.
//!
//! # Invariants
//! - A completion count never exceeds the chore's `required_count`.
//! - Saves replace `completions` and re-read every other field fresh from the
//!   gateway, so concurrent setup edits survive.
//! - The highlight is presentation-only and never persisted.

use crate::model::setup::{
    assigned_chores, completion_count, Assignment, Chore, ChoreId, Completion, Kid, KidId,
    SetupRecord,
};
use crate::store::gateway::SetupGateway;
use crate::store::StorageBackend;
use log::{debug, info};
use std::time::{Duration, Instant};

/// How long a freshly completed chore stays highlighted.
pub const COMPLETION_PULSE: Duration = Duration::from_millis(1200);

pub const NO_KIDS_PLACEHOLDER: &str = "No kids — add kids in Setup";

/// An assigned chore paired with the selected kid's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoreProgress {
    pub chore: Chore,
    pub count: u32,
}

impl ChoreProgress {
    /// Progress label, e.g. `2/3`.
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.count, self.chore.required_count)
    }

    pub fn is_done(&self) -> bool {
        self.count >= self.chore.required_count
    }

    /// Whether the increment affordance is enabled.
    pub fn can_increment(&self) -> bool {
        !self.is_done()
    }
}

/// Result of one accepted increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncrementOutcome {
    pub chore_id: ChoreId,
    pub count: u32,
    pub required_count: u32,
    /// `true` when this increment reached the required count.
    pub completed: bool,
}

#[derive(Debug, Clone)]
struct CompletionPulse {
    chore_id: ChoreId,
    started_at: Instant,
}

/// In-memory state of the checklist screen over an injected gateway.
pub struct ChecklistScreen<B: StorageBackend> {
    gateway: SetupGateway<B>,
    kids: Vec<Kid>,
    chores: Vec<Chore>,
    assignments: Vec<Assignment>,
    completions: Vec<Completion>,
    reward_goal: u32,
    selected_kid_id: Option<KidId>,
    pulse: Option<CompletionPulse>,
}

impl<B: StorageBackend> ChecklistScreen<B> {
    /// Loads the persisted record and selects the first kid, if any.
    pub fn mount(gateway: SetupGateway<B>) -> Self {
        let mut screen = Self {
            gateway,
            kids: Vec::new(),
            chores: Vec::new(),
            assignments: Vec::new(),
            completions: Vec::new(),
            reward_goal: SetupRecord::default().reward_goal,
            selected_kid_id: None,
            pulse: None,
        };
        screen.reload();
        screen
    }

    /// Re-reads the record, keeping the current selection while it resolves.
    pub fn reload(&mut self) {
        let record = self.gateway.load();
        self.kids = record.kids;
        self.chores = record.chores;
        self.assignments = record.assignments;
        self.completions = record.completions;
        self.reward_goal = record.reward_goal;

        let still_valid = self
            .selected_kid_id
            .as_deref()
            .is_some_and(|selected| self.kids.iter().any(|kid| kid.id == selected));
        if !still_valid {
            self.selected_kid_id = self.kids.first().map(|kid| kid.id.clone());
        }
        debug!(
            "event=screen_mount module=checklist status=ok kids={} has_selection={}",
            self.kids.len(),
            self.selected_kid_id.is_some()
        );
    }

    pub fn kids(&self) -> &[Kid] {
        &self.kids
    }

    pub fn reward_goal(&self) -> u32 {
        self.reward_goal
    }

    /// Placeholder for the kid picker when nobody has been set up yet.
    pub fn kid_picker_placeholder(&self) -> Option<&'static str> {
        self.kids.is_empty().then_some(NO_KIDS_PLACEHOLDER)
    }

    /// Switches the active kid. Unknown ids are ignored.
    pub fn select_kid(&mut self, kid_id: &str) {
        if self.kids.iter().any(|kid| kid.id == kid_id) {
            self.selected_kid_id = Some(kid_id.to_string());
        }
    }

    pub fn selected_kid(&self) -> Option<&Kid> {
        let selected = self.selected_kid_id.as_deref()?;
        self.kids.iter().find(|kid| kid.id == selected)
    }

    /// Assigned chores of the selected kid with their counts, in assignment
    /// order. Dangling assignments are dropped.
    pub fn assigned_chores_with_progress(&self) -> Vec<ChoreProgress> {
        let Some(kid) = self.selected_kid() else {
            return Vec::new();
        };
        assigned_chores(&self.assignments, &self.chores, &kid.id)
            .map(|chore| ChoreProgress {
                count: completion_count(&self.completions, &kid.id, &chore.id)
                    .min(chore.required_count),
                chore: chore.clone(),
            })
            .collect()
    }

    /// Sum of progress over the selected kid's resolved assigned chores.
    ///
    /// Widened to `u64`: each count fits `u32`, their sum need not.
    pub fn total_stars(&self) -> u64 {
        self.assigned_chores_with_progress()
            .iter()
            .map(|item| u64::from(item.count))
            .fold(0, u64::saturating_add)
    }

    /// Goal label, e.g. `5 / 10 toward goal`.
    pub fn goal_label(&self) -> String {
        format!("{} / {} toward goal", self.total_stars(), self.reward_goal)
    }

    pub fn goal_reached(&self) -> bool {
        self.total_stars() >= u64::from(self.reward_goal)
    }

    /// Records one unit of progress using the current time for the highlight.
    pub fn increment(&mut self, chore_id: &str) -> Option<IncrementOutcome> {
        self.increment_at(chore_id, Instant::now())
    }

    /// Records one unit of progress for the selected kid.
    ///
    /// Returns `None` without saving when no kid is selected, the chore does
    /// not resolve, or the count is already at the required count.
    pub fn increment_at(&mut self, chore_id: &str, now: Instant) -> Option<IncrementOutcome> {
        let kid_id = self.selected_kid()?.id.clone();
        let required_count = self
            .chores
            .iter()
            .find(|chore| chore.id == chore_id)?
            .required_count;

        let current = completion_count(&self.completions, &kid_id, chore_id);
        if current >= required_count {
            debug!("event=chore_increment module=checklist status=skip reason=at_required_count");
            return None;
        }
        let next_count = (current + 1).min(required_count);

        match self
            .completions
            .iter_mut()
            .find(|completion| completion.kid_id == kid_id && completion.chore_id == chore_id)
        {
            Some(completion) => completion.count = next_count,
            None => self.completions.push(Completion {
                kid_id,
                chore_id: chore_id.to_string(),
                count: next_count,
            }),
        }

        let completed = next_count == required_count;
        if completed {
            self.pulse = Some(CompletionPulse {
                chore_id: chore_id.to_string(),
                started_at: now,
            });
        }
        info!(
            "event=chore_increment module=checklist status=ok count={} required_count={} completed={}",
            next_count, required_count, completed
        );
        self.persist();

        Some(IncrementOutcome {
            chore_id: chore_id.to_string(),
            count: next_count,
            required_count,
            completed,
        })
    }

    /// Chore currently highlighted as just completed, if the pulse is live.
    pub fn just_completed_at(&self, now: Instant) -> Option<&str> {
        self.pulse
            .as_ref()
            .filter(|pulse| now.saturating_duration_since(pulse.started_at) < COMPLETION_PULSE)
            .map(|pulse| pulse.chore_id.as_str())
    }

    /// Drops an expired highlight. Returns `true` when one was cleared.
    pub fn clear_expired_pulse(&mut self, now: Instant) -> bool {
        if self.pulse.is_some() && self.just_completed_at(now).is_none() {
            self.pulse = None;
            return true;
        }
        false
    }

    fn persist(&self) {
        let fresh = self.gateway.load();
        let record = SetupRecord {
            completions: self.completions.clone(),
            ..fresh
        };
        self.gateway.save(&record);
    }
}

#[cfg(test)]
mod tests {
    use super::ChoreProgress;
    use crate::model::setup::Chore;

    #[test]
    fn progress_label_and_affordance_follow_count() {
        let chore = Chore::new("Dishes", 3);
        let partial = ChoreProgress {
            chore: chore.clone(),
            count: 2,
        };
        assert_eq!(partial.progress_label(), "2/3");
        assert!(partial.can_increment());

        let done = ChoreProgress { chore, count: 3 };
        assert_eq!(done.progress_label(), "3/3");
        assert!(done.is_done());
        assert!(!done.can_increment());
    }
}
