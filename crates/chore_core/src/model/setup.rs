//! Setup record and its entities.
//!
//! # Invariants
//! - `Chore::required_count` is always >= 1.
//! - `SetupRecord::reward_goal` is always >= 1.
//! - At most one `Assignment` and one `Completion` exist per (kid, chore) pair.
//! - A completion count never exceeds the chore's `required_count`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque kid identifier. Format carries no meaning.
pub type KidId = String;
/// Opaque chore identifier. Format carries no meaning.
pub type ChoreId = String;

/// Reward goal used when none is stored or the stored one is malformed.
pub const DEFAULT_REWARD_GOAL: u32 = 10;

/// Generates a fresh collision-resistant id for a new kid or chore.
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}

/// Clamps a raw count or goal to the minimum of 1.
pub fn clamp_min_one(value: i64) -> u32 {
    u32::try_from(value.max(1)).unwrap_or(u32::MAX)
}

/// One child profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kid {
    pub id: KidId,
    pub name: String,
}

impl Kid {
    /// Creates a kid with a generated id. Callers pass an already trimmed name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
        }
    }
}

/// A chore definition with its target repetition count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chore {
    pub id: ChoreId,
    pub name: String,
    /// Increments needed before the chore counts as done.
    pub required_count: u32,
}

impl Chore {
    /// Creates a chore with a generated id; `required_count` is clamped to >= 1.
    pub fn new(name: impl Into<String>, required_count: i64) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            required_count: clamp_min_one(required_count),
        }
    }
}

/// Link stating that a chore applies to a kid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub kid_id: KidId,
    pub chore_id: ChoreId,
}

impl Assignment {
    pub fn matches(&self, kid_id: &str, chore_id: &str) -> bool {
        self.kid_id == kid_id && self.chore_id == chore_id
    }
}

/// Progress of one kid toward one chore. Absence means a count of zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    pub kid_id: KidId,
    pub chore_id: ChoreId,
    pub count: u32,
}

/// The single persisted aggregate shared by every screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupRecord {
    pub kids: Vec<Kid>,
    pub chores: Vec<Chore>,
    pub assignments: Vec<Assignment>,
    pub completions: Vec<Completion>,
    pub reward_goal: u32,
}

impl Default for SetupRecord {
    fn default() -> Self {
        Self {
            kids: Vec::new(),
            chores: Vec::new(),
            assignments: Vec::new(),
            completions: Vec::new(),
            reward_goal: DEFAULT_REWARD_GOAL,
        }
    }
}

impl SetupRecord {
    /// Current completion count for the pair; zero when no record exists.
    pub fn completion_count(&self, kid_id: &str, chore_id: &str) -> u32 {
        completion_count(&self.completions, kid_id, chore_id)
    }

    /// Chores assigned to `kid_id`, in assignment order, skipping dangling links.
    pub fn assigned_chores<'a>(&'a self, kid_id: &'a str) -> impl Iterator<Item = &'a Chore> + 'a {
        assigned_chores(&self.assignments, &self.chores, kid_id)
    }
}

/// Looks up a completion count in a completion list.
pub fn completion_count(completions: &[Completion], kid_id: &str, chore_id: &str) -> u32 {
    completions
        .iter()
        .find(|completion| completion.kid_id == kid_id && completion.chore_id == chore_id)
        .map_or(0, |completion| completion.count)
}

/// Resolves a kid's assignments to chores, dropping those that do not resolve.
pub fn assigned_chores<'a>(
    assignments: &'a [Assignment],
    chores: &'a [Chore],
    kid_id: &'a str,
) -> impl Iterator<Item = &'a Chore> + 'a {
    assignments
        .iter()
        .filter(move |assignment| assignment.kid_id == kid_id)
        .filter_map(move |assignment| chores.iter().find(|chore| chore.id == assignment.chore_id))
}

#[cfg(test)]
mod tests {
    use super::{clamp_min_one, Assignment, Chore, SetupRecord};

    #[test]
    fn clamp_min_one_floors_at_one() {
        assert_eq!(clamp_min_one(0), 1);
        assert_eq!(clamp_min_one(-5), 1);
        assert_eq!(clamp_min_one(4), 4);
    }

    #[test]
    fn assigned_chores_skips_dangling_links() {
        let dishes = Chore::new("Dishes", 3);
        let record = SetupRecord {
            chores: vec![dishes.clone()],
            assignments: vec![
                Assignment {
                    kid_id: "kid-a".to_string(),
                    chore_id: "missing".to_string(),
                },
                Assignment {
                    kid_id: "kid-a".to_string(),
                    chore_id: dishes.id.clone(),
                },
            ],
            ..SetupRecord::default()
        };

        let names = record
            .assigned_chores("kid-a")
            .map(|chore| chore.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Dishes"]);
        assert_eq!(record.assigned_chores("kid-b").count(), 0);
    }
}
