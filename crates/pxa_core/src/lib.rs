//! Engine-agnostic building blocks shared by the game and the runtime shell.

pub mod animation;
pub mod geometry;
pub mod input;
pub mod time;
