use chore_core::{Assignment, Chore, Completion, Kid, SetupRecord, DEFAULT_REWARD_GOAL};
use std::collections::HashSet;

#[test]
fn default_record_is_empty_with_goal_ten() {
    let record = SetupRecord::default();

    assert!(record.kids.is_empty());
    assert!(record.chores.is_empty());
    assert!(record.assignments.is_empty());
    assert!(record.completions.is_empty());
    assert_eq!(record.reward_goal, DEFAULT_REWARD_GOAL);
    assert_eq!(DEFAULT_REWARD_GOAL, 10);
}

#[test]
fn new_entities_get_unique_ids() {
    let ids = (0..50)
        .map(|index| Kid::new(format!("kid {index}")).id)
        .chain((0..50).map(|index| Chore::new(format!("chore {index}"), 1).id))
        .collect::<HashSet<_>>();

    assert_eq!(ids.len(), 100);
}

#[test]
fn chore_new_clamps_required_count() {
    assert_eq!(Chore::new("Dishes", 0).required_count, 1);
    assert_eq!(Chore::new("Dishes", -5).required_count, 1);
    assert_eq!(Chore::new("Dishes", 3).required_count, 3);
}

#[test]
fn record_serialization_uses_expected_wire_fields() {
    let record = SetupRecord {
        kids: vec![Kid {
            id: "k1".to_string(),
            name: "Ava".to_string(),
        }],
        chores: vec![Chore {
            id: "c1".to_string(),
            name: "Dishes".to_string(),
            required_count: 3,
        }],
        assignments: vec![Assignment {
            kid_id: "k1".to_string(),
            chore_id: "c1".to_string(),
        }],
        completions: vec![Completion {
            kid_id: "k1".to_string(),
            chore_id: "c1".to_string(),
            count: 2,
        }],
        reward_goal: 5,
    };

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["kids"][0]["name"], "Ava");
    assert_eq!(json["chores"][0]["requiredCount"], 3);
    assert_eq!(json["assignments"][0]["kidId"], "k1");
    assert_eq!(json["assignments"][0]["choreId"], "c1");
    assert_eq!(json["completions"][0]["count"], 2);
    assert_eq!(json["rewardGoal"], 5);

    let decoded: SetupRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn completion_count_defaults_to_zero() {
    let record = SetupRecord {
        completions: vec![Completion {
            kid_id: "k1".to_string(),
            chore_id: "c1".to_string(),
            count: 2,
        }],
        ..SetupRecord::default()
    };

    assert_eq!(record.completion_count("k1", "c1"), 2);
    assert_eq!(record.completion_count("k1", "c2"), 0);
    assert_eq!(record.completion_count("k2", "c1"), 0);
}
