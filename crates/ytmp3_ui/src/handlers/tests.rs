use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tempfile::{tempdir, TempDir};

use ytmp3_core::config::ConfigManager;
use ytmp3_core::controller::Controller;
use ytmp3_core::models::{
    DownloadStatus, Session, SessionState, TimePoint, TimeUnit, TimeValue, TrimTimestamps,
};

use crate::app::App;
use crate::types::{TrimField, TrimFieldOwner, WindowKind};

fn app() -> (TempDir, App) {
    let dir = tempdir().unwrap();
    let mut manager = ConfigManager::new(dir.path().join("settings.toml"));
    manager.load_or_create().unwrap();
    manager.settings_mut().paths.default_save_dir =
        dir.path().join("music").to_string_lossy().to_string();
    let controller = Controller::with_configured_tools(Arc::new(Mutex::new(manager)));
    let (app, _task) = App::new(controller);
    (dir, app)
}

fn trim_field(point: TimePoint, unit: TimeUnit) -> TrimField {
    TrimField {
        owner: TrimFieldOwner::Trim,
        point,
        unit,
    }
}

fn trim_windows(app: &App) -> usize {
    app.window_map
        .values()
        .filter(|kind| **kind == WindowKind::Trim)
        .count()
}

#[test]
fn starts_with_main_window_only() {
    let (_dir, app) = app();
    assert_eq!(app.window_map.len(), 1);
    assert!(app.main_window_id.is_some());
    assert!(app.trim_window_id.is_none());
}

#[test]
fn opening_trim_window_twice_keeps_one() {
    let (_dir, mut app) = app();
    let _ = app.open_trim_window();
    let first = app.trim_window_id;
    let _ = app.open_trim_window();

    assert!(first.is_some());
    assert_eq!(app.trim_window_id, first);
    assert_eq!(trim_windows(&app), 1);
}

#[test]
fn second_open_does_not_clobber_saved_range() {
    let (_dir, mut app) = app();
    app.controller
        .set_trim_value(TimePoint::End, TimeUnit::Second, TimeValue::Whole(30));
    let before = app.controller.trim_timestamps();

    let _ = app.open_trim_window();
    app.set_trim_field(trim_field(TimePoint::End, TimeUnit::Second), "12".to_string());
    let _ = app.open_trim_window();
    let _ = app.close_trim_window();

    assert_eq!(app.controller.trim_timestamps(), before);
}

#[test]
fn opening_trim_window_resets_range() {
    let (_dir, mut app) = app();
    app.controller
        .set_trim_value(TimePoint::Start, TimeUnit::Minute, TimeValue::Whole(2));
    let _ = app.open_trim_window();
    assert!(app.controller.trim_timestamps_not_set());
}

#[test]
fn cancel_restores_range_after_edits() {
    let (_dir, mut app) = app();
    app.controller
        .set_trim_value(TimePoint::Start, TimeUnit::Second, TimeValue::Whole(5));
    app.controller
        .set_trim_value(TimePoint::End, TimeUnit::Second, TimeValue::Fractional(20.5));
    let before = app.controller.trim_timestamps();

    let _ = app.open_trim_window();
    app.set_trim_field(trim_field(TimePoint::Start, TimeUnit::Hour), "1".to_string());
    app.set_trim_field(trim_field(TimePoint::End, TimeUnit::Second), "7".to_string());
    let _ = app.close_trim_window();

    assert_eq!(app.controller.trim_timestamps(), before);
    assert!(app.trim_window_id.is_none());
    assert_eq!(trim_windows(&app), 0);
}

#[test]
fn window_manager_close_behaves_like_cancel() {
    let (_dir, mut app) = app();
    let _ = app.open_trim_window();
    let id = app.trim_window_id.unwrap();
    app.set_trim_field(trim_field(TimePoint::End, TimeUnit::Minute), "3".to_string());

    let _ = app.handle_window_closed(id);

    assert!(app.controller.trim_timestamps_not_set());
    assert!(app.trim_window_id.is_none());
    assert!(app.previous_trim_settings.is_none());
}

#[test]
fn set_trim_field_parses_entries() {
    let (_dir, mut app) = app();
    let minute = trim_field(TimePoint::Start, TimeUnit::Minute);

    app.set_trim_field(minute, "90".to_string());
    assert_eq!(
        app.controller.trim_timestamps().get(TimePoint::Start, TimeUnit::Minute),
        TimeValue::Whole(90)
    );

    app.set_trim_field(minute, "abc".to_string());
    assert_eq!(
        app.controller.trim_timestamps().get(TimePoint::Start, TimeUnit::Minute),
        TimeValue::Whole(90)
    );
    assert_eq!(app.trim_fields.get(TimePoint::Start, TimeUnit::Minute), "abc");

    app.set_trim_field(minute, "1.5".to_string());
    assert_eq!(
        app.controller.trim_timestamps().get(TimePoint::Start, TimeUnit::Minute),
        TimeValue::Fractional(1.5)
    );

    app.set_trim_field(minute, "".to_string());
    assert_eq!(
        app.controller.trim_timestamps().get(TimePoint::Start, TimeUnit::Minute),
        TimeValue::Whole(0)
    );
}

#[test]
fn negative_entry_shows_hint_in_its_window() {
    let (_dir, mut app) = app();
    let field = TrimField {
        owner: TrimFieldOwner::AudioSettings,
        point: TimePoint::End,
        unit: TimeUnit::Second,
    };

    app.set_trim_field(field, "-4".to_string());
    assert!(app.controller.trim_timestamps_not_set());
    assert!(app
        .trim_input_error_for(TrimFieldOwner::AudioSettings)
        .is_some_and(|hint| hint.contains("-4")));
    assert_eq!(app.trim_input_error_for(TrimFieldOwner::Trim), None);

    app.set_trim_field(field, "4".to_string());
    assert_eq!(app.trim_input_error_for(TrimFieldOwner::AudioSettings), None);
}

#[test]
fn start_download_while_downloading_claims_nothing() {
    let (_dir, mut app) = app();
    app.session.state = SessionState::Downloading;
    app.url_input = "https://youtu.be/abc".to_string();

    let _ = app.start_download();

    assert!(!app.controller.is_busy());
    assert_eq!(app.controller.url(), "");
}

#[test]
fn start_download_claims_the_job_slot() {
    let (_dir, mut app) = app();
    app.url_input = "  https://youtu.be/abc ".to_string();

    let _ = app.start_download();

    assert!(app.controller.is_busy());
    assert_eq!(app.controller.url(), "https://youtu.be/abc");
    assert!(app.claim_job().is_none());
}

#[test]
fn default_dir_with_empty_display_is_noop() {
    let (_dir, mut app) = app();
    let before = app.controller.default_save_dir();

    app.set_default_save_dir();

    assert_eq!(app.controller.default_save_dir(), before);
    assert_eq!(app.controller.state(), SessionState::Request);
}

#[test]
fn default_dir_is_saved_from_display() {
    let (dir, mut app) = app();
    let picked = dir.path().join("picked");
    app.handle_save_dir_selected(Some(picked.clone()));
    assert_eq!(app.save_dir_display, picked.to_string_lossy());
    assert_eq!(app.controller.save_dir(), picked.to_string_lossy());

    app.set_default_save_dir();

    assert_eq!(app.controller.default_save_dir(), picked.to_string_lossy());
    assert_eq!(app.controller.state(), SessionState::SaveDirChanged);
}

#[test]
fn cancelled_folder_dialog_keeps_display() {
    let (_dir, mut app) = app();
    app.save_dir_display = "/music".to_string();
    app.handle_save_dir_selected(None);
    assert_eq!(app.save_dir_display, "/music");
}

#[test]
fn commit_without_timestamps_reports_error() {
    let (_dir, mut app) = app();
    let _ = app.open_trim_window();
    app.handle_trim_file_selected(Some(PathBuf::from("/music/a.mp3")));

    let _ = app.commit_trim();

    assert_eq!(app.controller.state(), SessionState::Error);
    assert_eq!(app.controller.error_message(), "Trim timestamps not set!");
    assert!(!app.controller.is_busy());
}

#[test]
fn commit_with_range_claims_the_job_slot() {
    let (_dir, mut app) = app();
    let _ = app.open_trim_window();
    app.handle_trim_file_selected(Some(PathBuf::from("/music/a.mp3")));
    app.set_trim_field(trim_field(TimePoint::End, TimeUnit::Second), "10".to_string());

    let _ = app.commit_trim();

    assert!(app.controller.is_busy());
}

#[test]
fn filename_goes_straight_to_controller() {
    let (_dir, mut app) = app();
    let _ = app.open_audio_settings_window();
    app.set_filename("my song".to_string());
    assert_eq!(app.controller.custom_filename(), "my song");

    let _ = app.close_audio_settings_window();
    assert_eq!(app.controller.custom_filename(), "my song");
    assert!(app.audio_settings_window_id.is_none());
}

#[test]
fn audio_settings_close_keeps_trim_range() {
    let (_dir, mut app) = app();
    let _ = app.open_audio_settings_window();
    app.set_trim_field(
        TrimField {
            owner: TrimFieldOwner::AudioSettings,
            point: TimePoint::End,
            unit: TimeUnit::Minute,
        },
        "2".to_string(),
    );
    let _ = app.close_audio_settings_window();

    let mut expected = TrimTimestamps::default();
    expected.set(TimePoint::End, TimeUnit::Minute, TimeValue::Whole(2));
    assert_eq!(app.controller.trim_timestamps(), expected);
}

#[test]
fn session_changes_refresh_progress_and_log() {
    let (_dir, mut app) = app();
    app.handle_session_changed(Session {
        state: SessionState::Downloading,
        download_status: DownloadStatus {
            progress: "\u{1b}[0;94m 50.0%\u{1b}[0m".to_string(),
            speed: "1.00MiB/s".to_string(),
            eta: "00:05".to_string(),
        },
        ..Default::default()
    });
    assert_eq!(app.progress.fraction, 0.5);
    assert_eq!(app.progress.label, "50.0%");
    assert_eq!(app.log_text, "Downloading... SPEED 1.00MiB/s ETA 00:05");

    app.handle_session_changed(Session {
        state: SessionState::Error,
        error_message: "boom".to_string(),
        ..Default::default()
    });
    assert_eq!(app.progress.fraction, 0.5);
    assert_eq!(app.log_text, "An error occured: boom");
}

fn commit_range_to(app: &mut App, end_seconds: &str) {
    let _ = app.open_trim_window();
    app.handle_trim_file_selected(Some(PathBuf::from("/music/a.mp3")));
    app.set_trim_field(
        trim_field(TimePoint::End, TimeUnit::Second),
        end_seconds.to_string(),
    );
    let _ = app.commit_trim();
}

#[test]
fn close_after_commit_keeps_the_committed_range() {
    let (_dir, mut app) = app();
    app.controller
        .set_trim_value(TimePoint::Start, TimeUnit::Minute, TimeValue::Whole(4));

    commit_range_to(&mut app, "10");
    let committed = app.controller.trim_timestamps();
    let _ = app.close_trim_window();

    assert_eq!(app.controller.trim_timestamps(), committed);
    assert_eq!(
        committed.get(TimePoint::End, TimeUnit::Second),
        TimeValue::Whole(10)
    );
}

#[test]
fn window_manager_close_after_commit_keeps_range() {
    let (_dir, mut app) = app();
    commit_range_to(&mut app, "10");
    let committed = app.controller.trim_timestamps();
    let id = app.trim_window_id.unwrap();

    let _ = app.handle_window_closed(id);

    assert_eq!(app.controller.trim_timestamps(), committed);
}

#[test]
fn refused_commit_still_restores_on_close() {
    let (_dir, mut app) = app();
    app.controller
        .set_trim_value(TimePoint::End, TimeUnit::Minute, TimeValue::Whole(3));
    let before = app.controller.trim_timestamps();

    // Job slot already taken, so the commit starts nothing.
    app.controller.begin_job().unwrap();
    commit_range_to(&mut app, "10");
    let _ = app.close_trim_window();

    assert_eq!(app.controller.trim_timestamps(), before);
}
