use std::fs;
use std::path::Path;

use chrono::{Duration, TimeZone, Utc};
use dashboard_app::{AppConfig, AppError, AppPaths, AppState, MonitorSettings, VelocityEstimator};
use dashboard_core::ContextSource;
use tempfile::tempdir;

const KEY: &str = "agent:main:test";

fn app_state(home: &Path) -> AppState {
    let settings = MonitorSettings {
        workspace_key: KEY.to_string(),
        skill_dirs: Some(vec![home.join("workspace").join("skills")]),
        ..MonitorSettings::default()
    };
    AppState::new(AppConfig::new(AppPaths::new(home.to_path_buf()), &settings))
}

fn write_registry(paths: &AppPaths, contents: &str) {
    fs::create_dir_all(&paths.sessions_dir).expect("sessions dir");
    fs::write(&paths.registry_path, contents).expect("registry");
}

#[test]
fn registry_failure_is_a_single_error() {
    let dir = tempdir().expect("temp dir");
    let state = app_state(dir.path());
    let mut velocity = VelocityEstimator::new();

    let err = state
        .services
        .snapshot
        .assemble(&mut velocity)
        .expect_err("no registry");
    assert!(matches!(err, AppError::Registry(_)));

    write_registry(&state.config.paths, r#"{"someone-else":{"sessionId":"x"}}"#);
    let err = state
        .services
        .snapshot
        .assemble(&mut velocity)
        .expect_err("no workspace entry");
    assert_eq!(err.to_string(), "Workspace session not found");
    assert_eq!(velocity.last_usage(), None);
}

#[test]
fn secondary_sources_missing_still_yield_snapshot() {
    let dir = tempdir().expect("temp dir");
    let state = app_state(dir.path());
    write_registry(
        &state.config.paths,
        &format!(r#"{{"{KEY}":{{"sessionId":"s-1","updatedAt":1772359200000}}}}"#),
    );
    let mut velocity = VelocityEstimator::new();

    let snapshot = state
        .services
        .snapshot
        .assemble(&mut velocity)
        .expect("snapshot");
    assert_eq!(snapshot.label, "Workspace");
    assert_eq!(snapshot.model, "unknown");
    assert_eq!(snapshot.context_window, 1_000_000);
    assert_eq!(snapshot.context_source, ContextSource::Unavailable);
    assert!(snapshot.usage.is_none());
    assert!(snapshot.context_used.is_none());
    assert!(snapshot.session_start.is_none());
    assert!(snapshot.handoff.is_none());
    assert!(snapshot.live.is_none());
    assert!(snapshot.boot.files.is_empty());
    assert_eq!(snapshot.velocity, 0);
    assert_eq!(snapshot.wrap_threshold, 500_000.0);
    assert!(snapshot.tokens_to_wrap.is_none());
    assert!(snapshot.minutes_to_wrap.is_none());
    assert_eq!(velocity.last_usage(), None);
}

#[test]
fn full_snapshot_tracks_velocity_across_polls() {
    let dir = tempdir().expect("temp dir");
    let state = app_state(dir.path());
    let paths = state.config.paths.clone();
    write_registry(
        &paths,
        &format!(
            r#"{{"{KEY}":{{"sessionId":"s-1","label":"Buffer","model":"opus","contextTokens":200000}}}}"#
        ),
    );
    let log_path = paths.session_log("s-1");
    fs::write(
        &log_path,
        concat!(
            r#"{"type":"session","timestamp":"2026-03-01T10:00:00Z"}"#,
            "\n",
            r#"{"message":{"usage":{"input":20000,"cacheRead":0,"output":10}}}"#,
            "\n"
        ),
    )
    .expect("log");

    fs::create_dir_all(paths.workspace_dir.join("scratch")).expect("scratch");
    fs::write(
        &paths.live_session_path,
        r#"{"updatedAt":"2026-03-01T10:01:00Z","phase":"testing"}"#,
    )
    .expect("live");
    fs::write(
        &paths.handoff_path,
        "## Current Work\n- velocity panel\n## Next Steps\n- a\n- b\n",
    )
    .expect("handoff");
    fs::write(paths.workspace_dir.join("AGENTS.md"), "rules").expect("agents");

    let start = Utc.with_ymd_and_hms(2026, 3, 1, 10, 5, 0).unwrap();
    let mut velocity = VelocityEstimator::new();
    let first = state
        .services
        .snapshot
        .assemble_at(start, &mut velocity)
        .expect("first snapshot");
    assert_eq!(first.label, "Buffer");
    assert_eq!(first.model, "opus");
    assert_eq!(first.context_window, 200_000);
    assert_eq!(first.context_source, ContextSource::Jsonl);
    assert_eq!(first.context_used, Some(20_000));
    assert_eq!(first.session_start.as_deref(), Some("2026-03-01T10:00:00.000Z"));
    assert_eq!(first.velocity, 0);
    assert_eq!(first.tokens_to_wrap, Some(80_000.0));
    assert!(first.minutes_to_wrap.is_none());
    let live = first.live.expect("live");
    assert_eq!(live.fields.get("phase"), Some(&serde_json::Value::from("testing")));
    let handoff = first.handoff.expect("handoff");
    assert_eq!(handoff.current_work.as_deref(), Some("velocity panel"));
    assert_eq!(handoff.next_steps, vec!["a", "b"]);
    assert_eq!(first.boot.files.len(), 2);
    assert_eq!(first.boot.files[0].name, "AGENTS.md");

    fs::write(
        &log_path,
        concat!(
            r#"{"type":"session","timestamp":"2026-03-01T10:00:00Z"}"#,
            "\n",
            r#"{"message":{"usage":{"input":20000,"cacheRead":0,"output":10}}}"#,
            "\n",
            r#"{"message":{"usage":{"input":22000,"cacheRead":8000,"output":10}}}"#,
            "\n"
        ),
    )
    .expect("log");
    let second = state
        .services
        .snapshot
        .assemble_at(start + Duration::minutes(2), &mut velocity)
        .expect("second snapshot");
    assert_eq!(second.context_used, Some(30_000));
    assert_eq!(second.velocity, 5_000);
    assert_eq!(second.tokens_to_wrap, Some(70_000.0));
    assert_eq!(second.minutes_to_wrap, Some(14));
}

#[test]
fn stale_live_session_is_dropped_from_snapshot() {
    let dir = tempdir().expect("temp dir");
    let state = app_state(dir.path());
    let paths = state.config.paths.clone();
    write_registry(&paths, &format!(r#"{{"{KEY}":{{"sessionId":"s-2"}}}}"#));
    fs::write(
        paths.session_log("s-2"),
        "{\"ts\":\"2026-03-01T12:00:00Z\"}\n",
    )
    .expect("log");
    fs::create_dir_all(paths.workspace_dir.join("scratch")).expect("scratch");
    fs::write(
        &paths.live_session_path,
        r#"{"updatedAt":"2026-03-01T11:59:00Z"}"#,
    )
    .expect("live");

    let mut velocity = VelocityEstimator::new();
    let snapshot = state
        .services
        .snapshot
        .assemble(&mut velocity)
        .expect("snapshot");
    assert!(snapshot.live.is_none());
    assert!(!paths.live_session_path.exists());
    assert!(snapshot.usage.is_none());
}

#[test]
fn mistyped_registry_fields_use_defaults() {
    let dir = tempdir().expect("temp dir");
    let state = app_state(dir.path());
    write_registry(
        &state.config.paths,
        &format!(r#"{{"{KEY}":{{"sessionId":"s-1","contextTokens":200000.0,"label":7,"model":false}}}}"#),
    );
    let mut velocity = VelocityEstimator::new();

    let snapshot = state
        .services
        .snapshot
        .assemble(&mut velocity)
        .expect("snapshot");
    assert_eq!(snapshot.label, "Workspace");
    assert_eq!(snapshot.model, "unknown");
    assert_eq!(snapshot.context_window, 200_000);
}

#[test]
fn non_utf8_handoff_is_summarized() {
    let dir = tempdir().expect("temp dir");
    let state = app_state(dir.path());
    write_registry(
        &state.config.paths,
        &format!(r#"{{"{KEY}":{{"sessionId":"s-1"}}}}"#),
    );
    let note = b"## Current Work\n- caf\xe9 refactor\n";
    fs::create_dir_all(&state.config.paths.workspace_dir).expect("workspace");
    fs::write(&state.config.paths.handoff_path, note).expect("handoff");
    let mut velocity = VelocityEstimator::new();

    let snapshot = state
        .services
        .snapshot
        .assemble(&mut velocity)
        .expect("snapshot");
    let handoff = snapshot.handoff.expect("handoff summary");
    assert_eq!(handoff.current_work.as_deref(), Some("caf\u{fffd} refactor"));
    assert_eq!(handoff.size, note.len() as u64);
}
