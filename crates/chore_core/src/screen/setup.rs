//! Parent setup screen state.
//!
//! # Responsibility
//! - Create kids and chores, assign chores to the selected kid, set the goal.
//! - Persist every mutation as a full-record save.
//!
//! # Invariants
//! - Saves merge `completions` read fresh from the gateway, so progress
//!   recorded by the checklist in the meantime is kept.
//! - Selection and input fields are never persisted.

use crate::model::setup::{
    assigned_chores, clamp_min_one, Assignment, Chore, ChoreId, Kid, KidId, SetupRecord,
};
use crate::store::gateway::SetupGateway;
use crate::store::StorageBackend;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;

static INTEGER_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid integer prefix regex"));

pub const EMPTY_KIDS_MESSAGE: &str = "No kids yet.";
pub const EMPTY_CHORES_MESSAGE: &str = "No chores yet.";
pub const EMPTY_ASSIGNED_MESSAGE: &str = "No chores assigned yet.";

/// Parses free-form count input; unparsable or sub-1 values become 1.
pub fn parse_count_input(raw: &str) -> u32 {
    INTEGER_PREFIX_RE
        .captures(raw)
        .and_then(|captures| captures[1].parse::<i64>().ok())
        .map_or(1, clamp_min_one)
}

/// One resolved assignment shown under the selected kid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedChore {
    pub chore_id: ChoreId,
    pub name: String,
    pub required_count: u32,
}

impl AssignedChore {
    /// Display label, e.g. `Dishes (×3)`.
    pub fn label(&self) -> String {
        format!("{} (×{})", self.name, self.required_count)
    }
}

/// In-memory state of the setup screen over an injected gateway.
pub struct SetupScreen<B: StorageBackend> {
    gateway: SetupGateway<B>,
    kids: Vec<Kid>,
    chores: Vec<Chore>,
    assignments: Vec<Assignment>,
    reward_goal: u32,
    selected_kid_id: Option<KidId>,
    kid_name_input: String,
    chore_name_input: String,
    chore_required_count_input: u32,
}

impl<B: StorageBackend> SetupScreen<B> {
    /// Loads the persisted record and returns a freshly mounted screen.
    pub fn mount(gateway: SetupGateway<B>) -> Self {
        let record = gateway.load();
        debug!(
            "event=screen_mount module=setup status=ok kids={} chores={}",
            record.kids.len(),
            record.chores.len()
        );
        Self {
            gateway,
            kids: record.kids,
            chores: record.chores,
            assignments: record.assignments,
            reward_goal: record.reward_goal,
            selected_kid_id: None,
            kid_name_input: String::new(),
            chore_name_input: String::new(),
            chore_required_count_input: 1,
        }
    }

    pub fn kids(&self) -> &[Kid] {
        &self.kids
    }

    pub fn chores(&self) -> &[Chore] {
        &self.chores
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn reward_goal(&self) -> u32 {
        self.reward_goal
    }

    pub fn kid_name_input(&self) -> &str {
        &self.kid_name_input
    }

    pub fn chore_name_input(&self) -> &str {
        &self.chore_name_input
    }

    pub fn chore_required_count_input(&self) -> u32 {
        self.chore_required_count_input
    }

    pub fn set_kid_name_input(&mut self, value: impl Into<String>) {
        self.kid_name_input = value.into();
    }

    pub fn set_chore_name_input(&mut self, value: impl Into<String>) {
        self.chore_name_input = value.into();
    }

    /// Accepts raw text from the required-count field.
    pub fn set_chore_required_count_input(&mut self, raw: &str) {
        self.chore_required_count_input = parse_count_input(raw);
    }

    /// Adds a kid from the current name input.
    ///
    /// Returns the new id, or `None` when the trimmed name is empty.
    pub fn add_kid(&mut self) -> Option<KidId> {
        let name = self.kid_name_input.trim();
        if name.is_empty() {
            return None;
        }

        let kid = Kid::new(name);
        let kid_id = kid.id.clone();
        self.kids.push(kid);
        self.kid_name_input.clear();
        info!(
            "event=kid_add module=setup status=ok kid_count={}",
            self.kids.len()
        );
        self.persist();
        Some(kid_id)
    }

    /// Adds a chore from the current name and required-count inputs.
    ///
    /// Returns the new id, or `None` when the trimmed name is empty.
    pub fn add_chore(&mut self) -> Option<ChoreId> {
        let name = self.chore_name_input.trim();
        if name.is_empty() {
            return None;
        }

        let chore = Chore::new(name, i64::from(self.chore_required_count_input));
        let chore_id = chore.id.clone();
        self.chores.push(chore);
        self.chore_name_input.clear();
        self.chore_required_count_input = 1;
        info!(
            "event=chore_add module=setup status=ok chore_count={}",
            self.chores.len()
        );
        self.persist();
        Some(chore_id)
    }

    /// Selects the kid that assignments apply to. Unknown ids are ignored.
    pub fn select_kid(&mut self, kid_id: &str) {
        if self.kids.iter().any(|kid| kid.id == kid_id) {
            self.selected_kid_id = Some(kid_id.to_string());
        }
    }

    pub fn selected_kid(&self) -> Option<&Kid> {
        let selected = self.selected_kid_id.as_deref()?;
        self.kids.iter().find(|kid| kid.id == selected)
    }

    /// Whether the assign affordance is available.
    pub fn can_assign(&self) -> bool {
        self.selected_kid().is_some()
    }

    /// Assigns a chore to the selected kid.
    ///
    /// Returns `true` when a new assignment was recorded. Without a selected
    /// kid, or for an existing pair, nothing changes.
    pub fn assign_chore(&mut self, chore_id: &str) -> bool {
        let Some(kid_id) = self.selected_kid().map(|kid| kid.id.clone()) else {
            return false;
        };
        if self
            .assignments
            .iter()
            .any(|assignment| assignment.matches(&kid_id, chore_id))
        {
            debug!("event=chore_assign module=setup status=skip reason=duplicate");
            return false;
        }

        self.assignments.push(Assignment {
            kid_id,
            chore_id: chore_id.to_string(),
        });
        info!(
            "event=chore_assign module=setup status=ok assignment_count={}",
            self.assignments.len()
        );
        self.persist();
        true
    }

    /// Sets the global reward goal, clamped to at least 1.
    pub fn set_reward_goal(&mut self, value: i64) {
        self.reward_goal = clamp_min_one(value);
        info!(
            "event=reward_goal_set module=setup status=ok reward_goal={}",
            self.reward_goal
        );
        self.persist();
    }

    /// Chores assigned to the selected kid, in assignment order.
    pub fn assigned_chores_for_selected_kid(&self) -> Vec<AssignedChore> {
        let Some(kid) = self.selected_kid() else {
            return Vec::new();
        };
        assigned_chores(&self.assignments, &self.chores, &kid.id)
            .map(|chore| AssignedChore {
                chore_id: chore.id.clone(),
                name: chore.name.clone(),
                required_count: chore.required_count,
            })
            .collect()
    }

    /// Placeholder for the kid list while it is empty.
    pub fn empty_kids_message(&self) -> Option<&'static str> {
        self.kids.is_empty().then_some(EMPTY_KIDS_MESSAGE)
    }

    /// Placeholder for the chore list while it is empty.
    pub fn empty_chores_message(&self) -> Option<&'static str> {
        self.chores.is_empty().then_some(EMPTY_CHORES_MESSAGE)
    }

    /// Placeholder under the selected kid when none of their assignments resolve.
    /// `None` while no kid is selected.
    pub fn empty_assigned_message(&self) -> Option<&'static str> {
        self.selected_kid()?;
        self.assigned_chores_for_selected_kid()
            .is_empty()
            .then_some(EMPTY_ASSIGNED_MESSAGE)
    }

    fn persist(&self) {
        let fresh = self.gateway.load();
        let record = SetupRecord {
            kids: self.kids.clone(),
            chores: self.chores.clone(),
            assignments: self.assignments.clone(),
            completions: fresh.completions,
            reward_goal: self.reward_goal,
        };
        self.gateway.save(&record);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_count_input, AssignedChore};

    #[test]
    fn parse_count_input_reads_integer_prefix() {
        assert_eq!(parse_count_input("3"), 3);
        assert_eq!(parse_count_input("  12 times"), 12);
        assert_eq!(parse_count_input("+4"), 4);
    }

    #[test]
    fn parse_count_input_clamps_invalid_values_to_one() {
        assert_eq!(parse_count_input(""), 1);
        assert_eq!(parse_count_input("abc"), 1);
        assert_eq!(parse_count_input("0"), 1);
        assert_eq!(parse_count_input("-5"), 1);
    }

    #[test]
    fn assigned_chore_label_shows_required_count() {
        let item = AssignedChore {
            chore_id: "c1".to_string(),
            name: "Dishes".to_string(),
            required_count: 3,
        };
        assert_eq!(item.label(), "Dishes (×3)");
    }
}
