use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{
    ARENA_HEIGHT, ARENA_WIDTH, FISH_SIZE, INITIAL_SPEED, MAX_SPEED, PERTURB_AMPLITUDE,
    PERTURB_PROBABILITY, SPAWN_MARGIN,
};
use crate::models::{Fish, FishRecord};

/// Rectangular region the fish swim in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
    /// Half of the sprite size; positions are inset by this much from every edge.
    pub half_size: f64,
    /// Inset used when placing freshly loaded fish.
    pub spawn_margin: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ARENA_WIDTH, ARENA_HEIGHT)
    }
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            half_size: FISH_SIZE / 2.0,
            spawn_margin: SPAWN_MARGIN,
        }
    }

    pub fn x_bounds(&self) -> (f64, f64) {
        (self.half_size, self.width - self.half_size)
    }

    pub fn y_bounds(&self) -> (f64, f64) {
        (self.half_size, self.height - self.half_size)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (min_x, max_x) = self.x_bounds();
        let (min_y, max_y) = self.y_bounds();
        (min_x..=max_x).contains(&x) && (min_y..=max_y).contains(&y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    /// Per-axis velocity clamp.
    pub max_speed: f64,
    /// Per-axis bound for the initial velocity.
    pub initial_speed: f64,
    /// Chance per axis per tick of a random nudge.
    pub perturb_probability: f64,
    pub perturb_amplitude: f64,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            initial_speed: INITIAL_SPEED,
            perturb_probability: PERTURB_PROBABILITY,
            perturb_amplitude: PERTURB_AMPLITUDE,
        }
    }
}

impl MotionParams {
    pub fn with_perturb_probability(mut self, probability: f64) -> Self {
        self.perturb_probability = probability.clamp(0.0, 1.0);
        self
    }
}

// Internal helper: one axis of the soft bounce. Returns the new position and velocity.
//
// An out-of-range step flips the velocity and re-steps from the old position.
// The result is not clamped, so a fish that starts outside the range can stay
// outside for a tick.
fn step_axis(position: f64, velocity: f64, min: f64, max: f64) -> (f64, f64) {
    let tentative = position + velocity;
    if tentative < min || tentative > max {
        let reflected = -velocity;
        (position + reflected, reflected)
    } else {
        (tentative, velocity)
    }
}

// Internal helper that samples a closed range, collapsing to the midpoint when empty.
fn sample_closed<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.random_range(low..=high)
    } else {
        (low + high) / 2.0
    }
}

/// Bounded Motion Simulator - advances fish one frame at a time.
pub struct MotionSimulator<R> {
    arena: Arena,
    params: MotionParams,
    rng: R,
}

impl MotionSimulator<StdRng> {
    pub fn from_os_rng(arena: Arena, params: MotionParams) -> Self {
        Self::new(arena, params, StdRng::from_os_rng())
    }

    pub fn seeded(arena: Arena, params: MotionParams, seed: u64) -> Self {
        Self::new(arena, params, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MotionSimulator<R> {
    pub fn new(arena: Arena, params: MotionParams, rng: R) -> Self {
        Self { arena, params, rng }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Attach random kinematics to freshly fetched records.
    pub fn initialize<I>(&mut self, records: I) -> Vec<Fish>
    where
        I: IntoIterator<Item = FishRecord>,
    {
        let margin = self.arena.spawn_margin;
        let speed = self.params.initial_speed;

        records
            .into_iter()
            .map(|record| Fish {
                record,
                x: sample_closed(&mut self.rng, margin, self.arena.width - margin),
                y: sample_closed(&mut self.rng, margin, self.arena.height - margin),
                vx: sample_closed(&mut self.rng, -speed, speed),
                vy: sample_closed(&mut self.rng, -speed, speed),
            })
            .collect()
    }

    /// Advance every fish by one step. Same length and order as the input.
    pub fn tick(&mut self, fishes: &[Fish]) -> Vec<Fish> {
        fishes.iter().map(|fish| self.step(fish)).collect()
    }

    fn step(&mut self, fish: &Fish) -> Fish {
        let (min_x, max_x) = self.arena.x_bounds();
        let (min_y, max_y) = self.arena.y_bounds();

        let (x, vx) = step_axis(fish.x, fish.vx, min_x, max_x);
        let (y, vy) = step_axis(fish.y, fish.vy, min_y, max_y);

        let vx = self.perturb(vx);
        let vy = self.perturb(vy);

        let max = self.params.max_speed;
        Fish {
            record: fish.record.clone(),
            x,
            y,
            vx: vx.clamp(-max, max),
            vy: vy.clamp(-max, max),
        }
    }

    fn perturb(&mut self, velocity: f64) -> f64 {
        if self.params.perturb_probability > 0.0
            && self.rng.random_bool(self.params.perturb_probability)
        {
            let amplitude = self.params.perturb_amplitude;
            velocity + sample_closed(&mut self.rng, -amplitude, amplitude)
        } else {
            velocity
        }
    }
}
