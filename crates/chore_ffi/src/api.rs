//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the setup, checklist and landing screens to Dart via FRB.
//! - Keep each call stateless: mount, apply one operation, return a snapshot.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Transient UI state (selection, inputs) is owned by the Dart side and
//!   passed in on every call.

use chore_core::db::open_db;
use chore_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, landing_page,
    ping as ping_inner, ChecklistScreen, SetupGateway, SetupScreen, SqliteStorage,
    TrackerConfig,
};
use log::warn;
use once_cell::sync::Lazy;

static CONFIG: Lazy<TrackerConfig> = Lazy::new(TrackerConfig::from_env);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes the core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error` (case-insensitive); blank uses
///   `CHORE_TRACKER_LOG_LEVEL` or the build default.
/// - `log_dir`: absolute directory for rolling logs; blank uses
///   `CHORE_TRACKER_LOG_DIR`.
/// - Returns an empty string on success, the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    init_logging_with(&CONFIG, &level, &log_dir)
}

fn init_logging_with(config: &TrackerConfig, level: &str, log_dir: &str) -> String {
    let (level, log_dir) = config.logging_args(level, log_dir);
    match init_logging_inner(&level, &log_dir) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkItem {
    pub label: String,
    pub href: String,
}

/// Landing page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingResponse {
    pub title: String,
    pub tagline: String,
    pub links: Vec<NavLinkItem>,
}

/// Returns the static landing page.
#[flutter_rust_bridge::frb(sync)]
pub fn landing_links() -> LandingResponse {
    let page = landing_page();
    LandingResponse {
        title: page.title.to_string(),
        tagline: page.tagline.to_string(),
        links: page
            .links
            .iter()
            .map(|link| NavLinkItem {
                label: link.label.to_string(),
                href: link.href().to_string(),
            })
            .collect(),
    }
}

/// Kid row shared by both screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KidItem {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// Chore row on the setup screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoreItem {
    pub id: String,
    pub name: String,
    pub required_count: u32,
}

/// Setup screen snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupSnapshot {
    pub kids: Vec<KidItem>,
    pub chores: Vec<ChoreItem>,
    /// Labels such as `Dishes (×3)` for the selected kid.
    pub assigned_labels: Vec<String>,
    pub can_assign: bool,
    pub reward_goal: u32,
    /// Empty-state placeholders, e.g. `No kids yet.`; `None` when the list has rows.
    pub empty_kids_message: Option<String>,
    pub empty_chores_message: Option<String>,
    /// Set only while a kid is selected and has no resolvable assignments.
    pub empty_assigned_message: Option<String>,
}

/// Setup mutation envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupActionResponse {
    /// Whether the operation changed state.
    pub ok: bool,
    /// Created kid/chore id, when one was created.
    pub created_id: Option<String>,
    pub message: String,
    pub snapshot: Option<SetupSnapshot>,
}

impl SetupActionResponse {
    fn from_screen(
        screen: &SetupScreen<SqliteStorage<'_>>,
        ok: bool,
        created_id: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            ok,
            created_id,
            message: message.into(),
            snapshot: Some(setup_snapshot(screen)),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            created_id: None,
            message: message.into(),
            snapshot: None,
        }
    }
}

/// Loads the setup screen with an optional selected kid.
#[flutter_rust_bridge::frb(sync)]
pub fn setup_load(selected_kid_id: Option<String>) -> SetupActionResponse {
    with_setup_screen(selected_kid_id, |screen| {
        SetupActionResponse::from_screen(screen, true, None, "Loaded.")
    })
}

/// Adds a kid; blank names are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn setup_add_kid(selected_kid_id: Option<String>, name: String) -> SetupActionResponse {
    with_setup_screen(selected_kid_id, |screen| {
        screen.set_kid_name_input(name);
        match screen.add_kid() {
            Some(kid_id) => SetupActionResponse::from_screen(screen, true, Some(kid_id), "Kid added."),
            None => SetupActionResponse::from_screen(screen, false, None, "Kid name is empty."),
        }
    })
}

/// Adds a chore; `required_count` is raw field text and is clamped to >= 1.
#[flutter_rust_bridge::frb(sync)]
pub fn setup_add_chore(
    selected_kid_id: Option<String>,
    name: String,
    required_count: String,
) -> SetupActionResponse {
    with_setup_screen(selected_kid_id, |screen| {
        screen.set_chore_name_input(name);
        screen.set_chore_required_count_input(&required_count);
        match screen.add_chore() {
            Some(chore_id) => {
                SetupActionResponse::from_screen(screen, true, Some(chore_id), "Chore added.")
            }
            None => SetupActionResponse::from_screen(screen, false, None, "Chore name is empty."),
        }
    })
}

/// Assigns a chore to the selected kid.
#[flutter_rust_bridge::frb(sync)]
pub fn setup_assign_chore(selected_kid_id: Option<String>, chore_id: String) -> SetupActionResponse {
    with_setup_screen(selected_kid_id, |screen| {
        if !screen.can_assign() {
            return SetupActionResponse::from_screen(screen, false, None, "Select a kid first.");
        }
        if screen.assign_chore(&chore_id) {
            SetupActionResponse::from_screen(screen, true, None, "Chore assigned.")
        } else {
            SetupActionResponse::from_screen(screen, false, None, "Chore already assigned.")
        }
    })
}

/// Sets the reward goal, clamped to >= 1.
#[flutter_rust_bridge::frb(sync)]
pub fn setup_set_reward_goal(selected_kid_id: Option<String>, value: i64) -> SetupActionResponse {
    with_setup_screen(selected_kid_id, |screen| {
        screen.set_reward_goal(value);
        SetupActionResponse::from_screen(screen, true, None, "Reward goal updated.")
    })
}

/// Checklist row for the selected kid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub chore_id: String,
    pub name: String,
    pub count: u32,
    pub required_count: u32,
    /// Label such as `2/3`.
    pub progress_label: String,
    pub can_increment: bool,
}

/// Checklist screen snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistResponse {
    pub ok: bool,
    pub message: String,
    pub kids: Vec<KidItem>,
    pub kid_placeholder: Option<String>,
    pub selected_kid_id: Option<String>,
    pub items: Vec<ChecklistItem>,
    pub total_stars: u64,
    pub reward_goal: u32,
    /// Label such as `5 / 10 toward goal`.
    pub goal_label: String,
    /// Chore that reached its required count in this call; the host runs the
    /// highlight timer.
    pub just_completed_chore_id: Option<String>,
}

impl ChecklistResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            kids: Vec::new(),
            kid_placeholder: None,
            selected_kid_id: None,
            items: Vec::new(),
            total_stars: 0,
            reward_goal: 0,
            goal_label: String::new(),
            just_completed_chore_id: None,
        }
    }
}

/// Loads the checklist; an unknown or missing selection falls back to the first kid.
#[flutter_rust_bridge::frb(sync)]
pub fn checklist_load(selected_kid_id: Option<String>) -> ChecklistResponse {
    with_checklist_screen(selected_kid_id, |screen| {
        checklist_snapshot(screen, true, "Loaded.", None)
    })
}

/// Records one unit of progress for the selected kid.
#[flutter_rust_bridge::frb(sync)]
pub fn checklist_increment(selected_kid_id: Option<String>, chore_id: String) -> ChecklistResponse {
    with_checklist_screen(selected_kid_id, |screen| match screen.increment(&chore_id) {
        Some(outcome) => {
            let completed = outcome.completed.then(|| outcome.chore_id.clone());
            checklist_snapshot(screen, true, "Progress recorded.", completed)
        }
        None => checklist_snapshot(screen, false, "Nothing to record.", None),
    })
}

fn with_setup_screen(
    selected_kid_id: Option<String>,
    f: impl FnOnce(&mut SetupScreen<SqliteStorage<'_>>) -> SetupActionResponse,
) -> SetupActionResponse {
    let conn = match open_db(&CONFIG.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error screen=setup error={err}");
            return SetupActionResponse::failure(format!("storage open failed: {err}"));
        }
    };
    let storage = match SqliteStorage::try_new(&conn) {
        Ok(storage) => storage,
        Err(err) => return SetupActionResponse::failure(format!("storage init failed: {err}")),
    };

    let mut screen = SetupScreen::mount(SetupGateway::new(storage));
    if let Some(kid_id) = selected_kid_id.as_deref() {
        screen.select_kid(kid_id);
    }
    f(&mut screen)
}

fn with_checklist_screen(
    selected_kid_id: Option<String>,
    f: impl FnOnce(&mut ChecklistScreen<SqliteStorage<'_>>) -> ChecklistResponse,
) -> ChecklistResponse {
    let conn = match open_db(&CONFIG.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error screen=checklist error={err}");
            return ChecklistResponse::failure(format!("storage open failed: {err}"));
        }
    };
    let storage = match SqliteStorage::try_new(&conn) {
        Ok(storage) => storage,
        Err(err) => return ChecklistResponse::failure(format!("storage init failed: {err}")),
    };

    let mut screen = ChecklistScreen::mount(SetupGateway::new(storage));
    if let Some(kid_id) = selected_kid_id.as_deref() {
        screen.select_kid(kid_id);
    }
    f(&mut screen)
}

fn setup_snapshot(screen: &SetupScreen<SqliteStorage<'_>>) -> SetupSnapshot {
    let selected = screen.selected_kid().map(|kid| kid.id.as_str());
    SetupSnapshot {
        kids: screen
            .kids()
            .iter()
            .map(|kid| KidItem {
                id: kid.id.clone(),
                name: kid.name.clone(),
                selected: selected == Some(kid.id.as_str()),
            })
            .collect(),
        chores: screen
            .chores()
            .iter()
            .map(|chore| ChoreItem {
                id: chore.id.clone(),
                name: chore.name.clone(),
                required_count: chore.required_count,
            })
            .collect(),
        assigned_labels: screen
            .assigned_chores_for_selected_kid()
            .iter()
            .map(|item| item.label())
            .collect(),
        can_assign: screen.can_assign(),
        reward_goal: screen.reward_goal(),
        empty_kids_message: screen.empty_kids_message().map(str::to_string),
        empty_chores_message: screen.empty_chores_message().map(str::to_string),
        empty_assigned_message: screen.empty_assigned_message().map(str::to_string),
    }
}

fn checklist_snapshot(
    screen: &ChecklistScreen<SqliteStorage<'_>>,
    ok: bool,
    message: &str,
    just_completed_chore_id: Option<String>,
) -> ChecklistResponse {
    let selected = screen.selected_kid().map(|kid| kid.id.clone());
    ChecklistResponse {
        ok,
        message: message.to_string(),
        kids: screen
            .kids()
            .iter()
            .map(|kid| KidItem {
                id: kid.id.clone(),
                name: kid.name.clone(),
                selected: selected.as_deref() == Some(kid.id.as_str()),
            })
            .collect(),
        kid_placeholder: screen.kid_picker_placeholder().map(str::to_string),
        selected_kid_id: selected,
        items: screen
            .assigned_chores_with_progress()
            .into_iter()
            .map(|item| ChecklistItem {
                progress_label: item.progress_label(),
                can_increment: item.can_increment(),
                count: item.count,
                required_count: item.chore.required_count,
                chore_id: item.chore.id,
                name: item.chore.name,
            })
            .collect(),
        total_stars: screen.total_stars(),
        reward_goal: screen.reward_goal(),
        goal_label: screen.goal_label(),
        just_completed_chore_id,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        checklist_increment, checklist_load, core_version, init_logging, init_logging_with,
        landing_links, ping, setup_add_chore, setup_add_kid, setup_assign_chore, setup_load,
        setup_set_reward_goal,
    };
    use chore_core::TrackerConfig;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());

        let unconfigured = TrackerConfig::from_lookup(|_| None);
        let error = init_logging_with(&unconfigured, "info", "  ");
        assert!(error.contains("cannot be empty"), "{error}");
    }

    #[test]
    fn init_logging_takes_blank_level_from_config() {
        let config = TrackerConfig::from_lookup(|name| {
            (name == "CHORE_TRACKER_LOG_LEVEL").then(|| "chatty".to_string())
        });
        // Unknown configured level resolves to the build default, so only the
        // relative directory is left to reject.
        let error = init_logging_with(&config, "", "relative/logs");
        assert!(error.contains("absolute"), "{error}");
    }

    #[test]
    fn landing_links_point_at_both_screens() {
        let landing = landing_links();
        let hrefs = landing
            .links
            .iter()
            .map(|link| link.href.as_str())
            .collect::<Vec<_>>();
        assert_eq!(hrefs, vec!["/setup", "/checklist"]);
        assert_eq!(landing.title, "Kid Chore Tracker");
    }

    #[test]
    fn setup_add_kid_rejects_blank_names() {
        let response = setup_add_kid(None, "   ".to_string());
        assert!(!response.ok);
        assert!(response.created_id.is_none());
    }

    #[test]
    fn setup_assign_requires_selected_kid() {
        let response = setup_assign_chore(None, "any-chore".to_string());
        assert!(!response.ok);
        assert_eq!(response.message, "Select a kid first.");
        let snapshot = response.snapshot.unwrap();
        assert_eq!(snapshot.empty_assigned_message, None);
        assert_eq!(snapshot.empty_kids_message.is_some(), snapshot.kids.is_empty());
    }

    // Sole writer to the shared database among these tests.
    #[test]
    fn setup_and_checklist_flow_through_shared_storage() {
        let kid_name = unique_token("kid");
        let kid = setup_add_kid(None, kid_name.clone());
        assert!(kid.ok, "{}", kid.message);
        let kid_id = kid.created_id.unwrap();

        let chore = setup_add_chore(Some(kid_id.clone()), unique_token("chore"), "0".to_string());
        assert!(chore.ok, "{}", chore.message);
        let chore_id = chore.created_id.unwrap();
        let chore_snapshot = chore.snapshot.unwrap();
        assert_eq!(chore_snapshot.empty_kids_message, None);
        assert_eq!(chore_snapshot.empty_chores_message, None);
        assert_eq!(
            chore_snapshot.empty_assigned_message.as_deref(),
            Some("No chores assigned yet.")
        );
        let stored_chore = chore_snapshot
            .chores
            .into_iter()
            .find(|item| item.id == chore_id)
            .unwrap();
        assert_eq!(stored_chore.required_count, 1);

        let assigned = setup_assign_chore(Some(kid_id.clone()), chore_id.clone());
        assert!(assigned.ok, "{}", assigned.message);
        let assigned_snapshot = assigned.snapshot.unwrap();
        assert_eq!(assigned_snapshot.assigned_labels.len(), 1);
        assert_eq!(assigned_snapshot.empty_assigned_message, None);

        let loaded = checklist_load(Some(kid_id.clone()));
        assert_eq!(loaded.selected_kid_id.as_deref(), Some(kid_id.as_str()));
        assert_eq!(loaded.items[0].progress_label, "0/1");

        let incremented = checklist_increment(Some(kid_id.clone()), chore_id.clone());
        assert!(incremented.ok, "{}", incremented.message);
        assert_eq!(incremented.just_completed_chore_id.as_deref(), Some(chore_id.as_str()));
        assert_eq!(incremented.items[0].progress_label, "1/1");
        assert!(!incremented.items[0].can_increment);

        let again = checklist_increment(Some(kid_id.clone()), chore_id);
        assert!(!again.ok);
        assert_eq!(again.total_stars, 1);

        let goal = setup_set_reward_goal(Some(kid_id.clone()), -2);
        assert!(goal.ok);
        assert_eq!(goal.snapshot.unwrap().reward_goal, 1);
        let reloaded = setup_load(Some(kid_id)).snapshot.unwrap();
        assert!(reloaded.can_assign);
        assert!(reloaded.kids.iter().any(|item| item.selected && item.name == kid_name));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
