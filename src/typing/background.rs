/// Decorative falling particles behind the play field. Purely cosmetic.
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;

use crate::core::effect::{FallEffect, FallPath, KeyframePool};

const PARTICLES: usize = 40;
const PATHS: usize = 20;
const VARIANCE: f32 = 15.0;

#[derive(Debug, Clone, Copy)]
struct Particle {
    path: FallPath,
    started: Duration,
    duration: Duration,
}

pub struct Background {
    enabled: bool,
    particles: Vec<Particle>,
    pool: KeyframePool,
    rng: StdRng,
}

impl Background {
    pub fn new(enabled: bool, mut rng: StdRng) -> Self {
        let mut pool = KeyframePool::unclamped(PATHS, VARIANCE);
        pool.prepare(&mut rng);
        let mut background = Self {
            enabled: false,
            particles: Vec::new(),
            pool,
            rng,
        };
        if enabled {
            background.set_enabled(true, Duration::ZERO);
        }
        background
    }

    /// Switch the particles on or off. Particles spawned at `now` start from
    /// the top of the field.
    pub fn set_enabled(&mut self, enabled: bool, now: Duration) {
        self.enabled = enabled;
        if !enabled {
            self.particles.clear();
            return;
        }
        if self.particles.is_empty() {
            self.particles = (0..PARTICLES)
                .map(|_| Particle {
                    path: self.pool.next_path(&mut self.rng),
                    started: now,
                    duration: particle_duration(&mut self.rng),
                })
                .collect();
        }
    }

    pub fn toggle(&mut self, now: Duration) {
        self.set_enabled(!self.enabled, now);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Restart every particle that reached the bottom.
    pub fn update(&mut self, now: Duration) {
        for particle in &mut self.particles {
            if particle.started + particle.duration <= now {
                particle.path = self.pool.next_path(&mut self.rng);
                particle.started = now;
                particle.duration = particle_duration(&mut self.rng);
            }
        }
    }

    /// Particle positions as `(x, y)` percentages of the field; `y` runs
    /// from -10 to 100.
    pub fn positions(&self, now: Duration) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.particles.iter().map(move |p| {
            let progress = (now.saturating_sub(p.started).as_secs_f32() / p.duration.as_secs_f32())
                .clamp(0.0, 1.0);
            (p.path.x_at(progress), -10.0 + 110.0 * progress)
        })
    }
}

fn particle_duration(rng: &mut StdRng) -> Duration {
    Duration::from_secs_f32(rng.random::<f32>() * 5.0 + 1.0)
}
