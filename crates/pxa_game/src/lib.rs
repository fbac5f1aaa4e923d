//! Pixel Adventure simulation core.
//!
//! Everything here is plain data and arithmetic: no window, no GPU, no audio
//! device. The runtime shell in `main.rs` feeds [`player::Controls`] and
//! pointer clicks into [`game::Game`], and hands it an [`audio::AudioOut`] and
//! a [`draw::DrawTarget`] to talk to the outside world.

pub mod assets;
pub mod audio;
pub mod character;
pub mod collision;
pub mod config;
pub mod draw;
pub mod enemy;
pub mod entity;
pub mod game;
pub mod level;
pub mod menu;
pub mod player;
#[cfg(test)]
mod replay;
