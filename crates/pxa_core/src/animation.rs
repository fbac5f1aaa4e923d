//! Tick-cadence frame cycling.
//!
//! Animations advance on simulation ticks rather than wall-clock time: every
//! `cadence` ticks the raw frame counter grows by one. The counter is never
//! wrapped in place. Callers pick a frame with [`Animator::select`], which
//! reduces it modulo the length of whichever sequence is active at that moment,
//! so swapping between sequences of different lengths is always in bounds.

#[derive(Debug, Clone)]
pub struct Animator {
    cadence: u32,
    ticks: u64,
    frame: u64,
}

impl Animator {
    /// `cadence` is clamped to at least one tick per frame.
    pub fn new(cadence: u32) -> Self {
        Self {
            cadence: cadence.max(1),
            ticks: 0,
            frame: 0,
        }
    }

    pub fn cadence(&self) -> u32 {
        self.cadence
    }

    pub fn set_cadence(&mut self, cadence: u32) {
        self.cadence = cadence.max(1);
    }

    /// Raw, unwrapped frame counter.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Count one tick. Returns true when this tick advanced the frame counter.
    pub fn tick(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks % u64::from(self.cadence) == 0 {
            self.frame += 1;
            true
        } else {
            false
        }
    }

    /// Index into a sequence of `len` frames. `None` for an empty sequence.
    pub fn index_for(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some((self.frame % len as u64) as usize)
    }

    pub fn select<'a, T>(&self, frames: &'a [T]) -> Option<&'a T> {
        self.index_for(frames.len()).map(|i| &frames[i])
    }
}
