//! Fixed-step accumulator for route integration.

use game_core::GameConfig;

/// Converts variable frame deltas into a whole number of fixed steps.
///
/// At most `max_steps` steps are released per frame. Whatever is left over
/// after a capped frame is discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameClock {
    fixed_timestep: f32,
    max_steps: u32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(fixed_timestep: f32, max_steps: u32) -> Self {
        Self {
            fixed_timestep,
            max_steps,
            accumulator: 0.0,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.fixed_timestep, config.max_fixed_steps)
    }

    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    /// Time banked toward the next step.
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Banks `dt` and returns how many fixed steps to run this frame.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }

        let mut steps = 0;
        while self.accumulator >= self.fixed_timestep && steps < self.max_steps {
            self.accumulator -= self.fixed_timestep;
            steps += 1;
        }
        if steps == self.max_steps && self.accumulator >= self.fixed_timestep {
            self.accumulator = 0.0;
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
