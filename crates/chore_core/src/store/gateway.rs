//! Setup record gateway.
//!
//! # Responsibility
//! - Load the setup record, repairing malformed fields with defaults.
//! - Save the full record, swallowing backend failures.
//!
//! # Invariants
//! - `load` never fails; corrupt input degrades per field, not per record.
//! - `save` always replaces the whole stored value.
//! - Log events carry counts and field names only, never entity names.

use super::{StorageBackend, StoreResult};
use crate::model::setup::{
    clamp_min_one, Assignment, Chore, Completion, Kid, SetupRecord, DEFAULT_REWARD_GOAL,
};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Fixed key identifying this application's record in shared storage.
pub const SETUP_STORAGE_KEY: &str = "kidchoretracker-setup";

/// Sole reader/writer of the persisted `SetupRecord`.
pub struct SetupGateway<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> SetupGateway<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Reads the persisted record, falling back to defaults on any problem.
    pub fn load(&self) -> SetupRecord {
        match self.backend.read(SETUP_STORAGE_KEY) {
            Ok(Some(raw)) => decode_record(&raw),
            Ok(None) => {
                debug!("event=setup_load module=store status=skip reason=missing");
                SetupRecord::default()
            }
            Err(err) => {
                warn!(
                    "event=setup_load module=store status=error reason=backend_read error={}",
                    err
                );
                SetupRecord::default()
            }
        }
    }

    /// Persists the full record. Failures are logged and discarded.
    pub fn save(&self, record: &SetupRecord) {
        match self.write_record(record) {
            Ok(()) => debug!(
                "event=setup_save module=store status=ok kids={} chores={} assignments={} completions={}",
                record.kids.len(),
                record.chores.len(),
                record.assignments.len(),
                record.completions.len()
            ),
            Err(err) => warn!("event=setup_save module=store status=error error={}", err),
        }
    }

    fn write_record(&self, record: &SetupRecord) -> StoreResult<()> {
        let payload = serde_json::to_string(record)?;
        self.backend.write(SETUP_STORAGE_KEY, &payload)
    }
}

/// Decodes a raw stored value with per-field fallback.
pub fn decode_record(raw: &str) -> SetupRecord {
    let value = match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                "event=setup_load module=store status=error reason=invalid_json error={}",
                err
            );
            return SetupRecord::default();
        }
    };
    let Some(object) = value.as_object() else {
        warn!("event=setup_load module=store status=error reason=not_an_object");
        return SetupRecord::default();
    };

    SetupRecord {
        kids: decode_list::<Kid>(object, "kids"),
        chores: decode_list::<StoredChore>(object, "chores")
            .into_iter()
            .map(StoredChore::into_chore)
            .collect(),
        assignments: decode_list::<Assignment>(object, "assignments"),
        completions: decode_list::<Completion>(object, "completions"),
        reward_goal: decode_reward_goal(object.get("rewardGoal")),
    }
}

/// Chore shape accepted from storage; `requiredCount` is decoded on its own.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredChore {
    id: String,
    name: String,
    #[serde(default)]
    required_count: Value,
}

impl StoredChore {
    fn into_chore(self) -> Chore {
        let required_count = decode_count(&self.required_count).unwrap_or_else(|| {
            warn!("event=setup_load module=store status=error reason=malformed_count field=requiredCount");
            1
        });
        Chore {
            id: self.id,
            name: self.name,
            required_count,
        }
    }
}

fn decode_list<T: DeserializeOwned>(object: &Map<String, Value>, field: &'static str) -> Vec<T> {
    let items = match object.get(field) {
        Some(Value::Array(items)) => items,
        Some(_) => {
            warn!("event=setup_load module=store status=error reason=field_not_array field={field}");
            return Vec::new();
        }
        None => return Vec::new(),
    };

    let decoded = items
        .iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect::<Vec<_>>();
    let dropped = items.len() - decoded.len();
    if dropped > 0 {
        warn!(
            "event=setup_load module=store status=error reason=malformed_items field={field} dropped={dropped}"
        );
    }
    decoded
}

fn decode_reward_goal(value: Option<&Value>) -> u32 {
    match value {
        Some(value) => decode_count(value).unwrap_or_else(|| {
            warn!("event=setup_load module=store status=error reason=malformed_count field=rewardGoal");
            DEFAULT_REWARD_GOAL
        }),
        None => DEFAULT_REWARD_GOAL,
    }
}

/// Reads an integral JSON number (`3` or `3.0`) clamped to `1..=u32::MAX`.
fn decode_count(value: &Value) -> Option<u32> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(count) = number.as_i64() {
        return Some(clamp_min_one(count));
    }
    if number.as_u64().is_some() {
        return Some(u32::MAX);
    }
    number
        .as_f64()
        .filter(|count| count.is_finite() && count.fract() == 0.0)
        .map(|count| clamp_min_one(count as i64))
}
