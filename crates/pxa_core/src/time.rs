//! Fixed-timestep frame clock.
//!
//! Wall-clock time feeds an accumulator; the simulation consumes it in
//! `fixed_dt` slices through `should_step()`. A single long frame is capped at
//! `max_frame` so a stall never turns into hundreds of catch-up steps.

use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

pub struct FrameClock {
    pub fixed_dt: f64,
    pub max_frame: f64,
    accumulator: f64,
    pub fixed_step_count: u64,
    pub frame_count: u64,
    pub steps_this_frame: u32,
    pub real_dt: f64,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new(step_hz: f64) -> Self {
        let fixed_dt = 1.0 / step_hz;
        Self {
            fixed_dt,
            max_frame: 0.25,
            accumulator: 0.0,
            fixed_step_count: 0,
            frame_count: 0,
            steps_this_frame: 0,
            real_dt: 0.0,
            last_instant: Instant::now(),
            fps_samples: [fixed_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: step_hz,
            smoothed_frame_time_ms: fixed_dt * 1000.0,
        }
    }

    /// Measure the wall-clock delta since the previous frame and feed it in.
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed);
    }

    /// Feed an explicit delta. `begin_frame` is a thin wrapper over this.
    pub fn advance(&mut self, elapsed: f64) {
        self.real_dt = if elapsed > self.max_frame {
            log::warn!(
                "Frame took {:.1}ms, capping to {:.0}ms",
                elapsed * 1000.0,
                self.max_frame * 1000.0
            );
            self.max_frame
        } else {
            elapsed.max(0.0)
        };

        self.accumulator += self.real_dt;
        self.steps_this_frame = 0;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.fixed_step_count += 1;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(clock: &mut FrameClock) -> u32 {
        let mut steps = 0;
        while clock.should_step() {
            steps += 1;
        }
        steps
    }

    #[test]
    fn one_fixed_dt_yields_one_step() {
        let mut clock = FrameClock::new(60.0);
        clock.advance(clock.fixed_dt);
        assert_eq!(drain(&mut clock), 1);
        assert_eq!(clock.steps_this_frame, 1);
        assert_eq!(clock.fixed_step_count, 1);
    }

    #[test]
    fn short_frames_accumulate() {
        let mut clock = FrameClock::new(60.0);
        clock.advance(clock.fixed_dt * 0.6);
        assert_eq!(drain(&mut clock), 0);
        clock.advance(clock.fixed_dt * 0.6);
        assert_eq!(drain(&mut clock), 1);
    }

    #[test]
    fn long_frame_is_capped() {
        // 8 Hz keeps every quantity exactly representable.
        let mut clock = FrameClock::new(8.0);
        clock.advance(5.0);
        assert!((clock.real_dt - clock.max_frame).abs() < 1e-12);
        assert_eq!(drain(&mut clock), 2);
    }

    #[test]
    fn steps_this_frame_resets_each_frame() {
        let mut clock = FrameClock::new(60.0);
        clock.advance(clock.fixed_dt * 3.5);
        drain(&mut clock);
        assert_eq!(clock.steps_this_frame, 3);
        clock.advance(0.0);
        assert_eq!(clock.steps_this_frame, 0);
        assert_eq!(clock.frame_count, 2);
    }
}
