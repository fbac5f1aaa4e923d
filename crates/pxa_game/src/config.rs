//! Screen geometry and gameplay tuning.
//!
//! Geometry is fixed. Tuning constants default to the shipped values and may be
//! overridden by an optional JSON file, which the runtime polls for changes
//! and reloads at frame boundaries. Omitted fields keep their defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;
pub const TITLE: &str = "Pixel Adventure Platformer";
pub const TUNING_PATH: &str = "config/tuning.json";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Downward acceleration added to vertical velocity every step.
    pub gravity: f32,
    /// Vertical velocity applied on jump. Negative is up.
    pub jump_impulse: f32,
    pub player_speed: f32,
    pub enemy_speed: f32,
    /// Simulation ticks per animation frame.
    pub animation_cadence: u32,
    /// How far below the bottom edge the player may fall before dying.
    pub fall_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_impulse: -10.0,
            player_speed: 4.0,
            enemy_speed: 2.0,
            animation_cadence: 10,
            fall_margin: 50.0,
        }
    }
}

pub fn load_tuning_from_path(path: &Path) -> Result<Tuning, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let tuning: Tuning = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse tuning JSON {}: {e}", path.display()))?;
    validate_tuning(&tuning)?;
    Ok(tuning)
}

/// Load the tuning file if it exists, otherwise fall back to defaults.
/// A present but invalid file is logged and ignored.
pub fn load_tuning_or_default(path: &Path) -> Tuning {
    if !path.exists() {
        log::info!(
            "No tuning file at '{}', using built-in defaults",
            path.display()
        );
        return Tuning::default();
    }
    match load_tuning_from_path(path) {
        Ok(tuning) => {
            log::info!("Loaded tuning from '{}'", path.display());
            tuning
        }
        Err(err) => {
            log::error!("{err}; using built-in defaults");
            Tuning::default()
        }
    }
}

fn validate_tuning(tuning: &Tuning) -> Result<(), String> {
    if !(tuning.gravity > 0.0) {
        return Err("Tuning validation failed: gravity must be > 0".to_string());
    }
    if !(tuning.jump_impulse < 0.0) {
        return Err("Tuning validation failed: jump_impulse must be < 0 (upward)".to_string());
    }
    if !(tuning.player_speed >= 0.0) || !(tuning.enemy_speed >= 0.0) {
        return Err("Tuning validation failed: speeds must be >= 0".to_string());
    }
    if tuning.animation_cadence == 0 {
        return Err("Tuning validation failed: animation_cadence must be >= 1".to_string());
    }
    if !(tuning.fall_margin >= 0.0) {
        return Err("Tuning validation failed: fall_margin must be >= 0".to_string());
    }
    Ok(())
}

/// Polls a file's modification time.
pub struct FileWatcher {
    path: PathBuf,
    last_seen_modified: Option<SystemTime>,
}

impl FileWatcher {
    pub fn new(path: PathBuf) -> Self {
        let last_seen_modified = modified_time(&path);
        Self {
            path,
            last_seen_modified,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once per observed change, including the file first appearing.
    pub fn should_reload(&mut self) -> bool {
        let current = modified_time(&self.path);
        match (self.last_seen_modified, current) {
            (Some(old), Some(now)) if now > old => {
                self.last_seen_modified = Some(now);
                true
            }
            (None, Some(now)) => {
                self.last_seen_modified = Some(now);
                true
            }
            _ => false,
        }
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    fn temp_file_path(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "pxa_tuning_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn defaults_match_shipped_constants() {
        let t = Tuning::default();
        assert_eq!(t.gravity, 0.5);
        assert_eq!(t.jump_impulse, -10.0);
        assert_eq!(t.player_speed, 4.0);
        assert_eq!(t.enemy_speed, 2.0);
        assert_eq!(t.animation_cadence, 10);
        assert_eq!(t.fall_margin, 50.0);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let path = temp_file_path("partial");
        fs::write(&path, r#"{ "gravity": 0.8, "player_speed": 5.0 }"#).expect("write temp file");

        let tuning = load_tuning_from_path(&path).expect("partial tuning should load");
        assert_eq!(tuning.gravity, 0.8);
        assert_eq!(tuning.player_speed, 5.0);
        assert_eq!(tuning.jump_impulse, Tuning::default().jump_impulse);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_downward_jump() {
        let path = temp_file_path("bad_jump");
        fs::write(&path, r#"{ "jump_impulse": 3.0 }"#).expect("write temp file");

        let err = load_tuning_from_path(&path).expect_err("positive jump should fail");
        assert!(err.contains("jump_impulse"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_zero_cadence() {
        let path = temp_file_path("bad_cadence");
        fs::write(&path, r#"{ "animation_cadence": 0 }"#).expect("write temp file");

        let err = load_tuning_from_path(&path).expect_err("zero cadence should fail");
        assert!(err.contains("animation_cadence"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_unknown_fields() {
        let path = temp_file_path("unknown");
        fs::write(&path, r#"{ "gravty": 0.5 }"#).expect("write temp file");

        let err = load_tuning_from_path(&path).expect_err("typo should fail");
        assert!(err.contains("Failed to parse"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = temp_file_path("missing");
        assert_eq!(load_tuning_or_default(&path), Tuning::default());
    }

    #[test]
    fn watcher_reports_file_appearing_once() {
        let path = temp_file_path("watch");
        let mut watcher = FileWatcher::new(path.clone());
        assert!(!watcher.should_reload());

        fs::write(&path, "{}").expect("write temp file");
        assert!(watcher.should_reload());
        assert!(!watcher.should_reload());
        let _ = fs::remove_file(path);
    }
}
