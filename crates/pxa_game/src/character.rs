//! Idle/run sprite cycling shared by the player and enemies.

use pxa_core::animation::Animator;

use crate::assets::LEFT_SUFFIX;
use crate::entity::Body;

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSet {
    pub idle: Vec<String>,
    pub run: Vec<String>,
}

impl FrameSet {
    pub fn new(idle: &[&str], run: &[&str]) -> Self {
        Self {
            idle: idle.iter().map(|s| s.to_string()).collect(),
            run: run.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A [`Body`] whose image is derived each tick from facing, motion and the
/// animation counter. `body.asset` is output only; writing it directly is
/// overwritten on the next [`Character::animate`].
#[derive(Debug, Clone)]
pub struct Character {
    pub body: Body,
    pub facing_right: bool,
    pub moving: bool,
    frames: FrameSet,
    animator: Animator,
    /// Whether left-facing frames have a `_left` variant in the asset store.
    mirrored_left: bool,
}

impl Character {
    pub fn new(mut body: Body, frames: FrameSet, cadence: u32, mirrored_left: bool) -> Self {
        if let Some(first) = frames.idle.first() {
            body.asset = first.clone();
        }
        Self {
            body,
            facing_right: true,
            moving: false,
            frames,
            animator: Animator::new(cadence),
            mirrored_left,
        }
    }

    pub fn set_cadence(&mut self, cadence: u32) {
        self.animator.set_cadence(cadence);
    }

    pub fn animate(&mut self) {
        self.animator.tick();
        let sequence = if self.moving {
            &self.frames.run
        } else {
            &self.frames.idle
        };
        let Some(name) = self.animator.select(sequence) else {
            return;
        };
        self.body.asset = if self.mirrored_left && !self.facing_right {
            format!("{name}{LEFT_SUFFIX}")
        } else {
            name.clone()
        };
    }
}
