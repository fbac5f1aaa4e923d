use crate::player::Controls;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ReplayFrame {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub jump: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    pub fn expanded_controls(&self) -> Vec<Controls> {
        self.frames
            .iter()
            .flat_map(|frame| {
                let controls = Controls {
                    left: frame.left,
                    right: frame.right,
                    jump: frame.jump,
                };
                std::iter::repeat(controls).take(frame.repeat as usize)
            })
            .collect()
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    if let Some(index) = replay.frames.iter().position(|f| f.repeat == 0) {
        return Err(format!(
            "Replay validation failed: frame {index} has repeat 0"
        ));
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::PlaceholderCatalog;
    use crate::config::Tuning;
    use crate::level::{build_world, World};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "pxa_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn run(controls: &[Controls]) -> (World, usize) {
        let tuning = Tuning::default();
        let mut world = build_world(&tuning, &PlaceholderCatalog);
        let mut steps = 0;
        for c in controls {
            steps += 1;
            if world.step(*c, &tuning).player_died() {
                break;
            }
        }
        (world, steps)
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "right": true, "repeat": 3 },
                { "jump": true }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let expanded = replay.expanded_controls();
        assert_eq!(expanded.len(), 4);
        assert!(expanded[0].right && !expanded[0].jump);
        assert!(expanded[3].jump);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn zero_repeat_is_rejected() {
        let path = temp_file_path("zero_repeat");
        fs::write(&path, r#"{ "frames": [ { "left": true, "repeat": 0 } ] }"#)
            .expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("repeat 0 should fail");
        assert!(err.contains("repeat 0"), "unexpected error: {err}");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let path = temp_file_path("deterministic");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "repeat": 90 },
                { "right": true, "repeat": 20 },
                { "right": true, "jump": true },
                { "right": true, "repeat": 40 },
                { "left": true, "repeat": 45 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let controls = replay.expanded_controls();
        let (run_a, steps_a) = run(&controls);
        let (run_b, steps_b) = run(&controls);

        assert_eq!(steps_a, steps_b);
        assert_eq!(run_a.player.body().pos, run_b.player.body().pos);
        assert!((run_a.player.vx - run_b.player.vx).abs() < 0.0001);
        assert!((run_a.player.vy - run_b.player.vy).abs() < 0.0001);
        assert_eq!(run_a.player.on_ground, run_b.player.on_ground);
        assert_eq!(run_a.player.body().asset, run_b.player.body().asset);
        for (a, b) in run_a.enemies.iter().zip(&run_b.enemies) {
            assert_eq!(a.body().pos, b.body().pos);
            assert_eq!(a.speed, b.speed);
        }

        let _ = fs::remove_file(path);
    }
}
