/// Cosmetic fall paths for words and background particles.
///
/// Paths never influence game timing; the engine only asks an effect for a
/// path when a word appears and hands it to the renderer.
use rand::rngs::StdRng;
use rand::Rng;

/// Horizontal path of a falling item, in percent of the field width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallPath {
    pub start_x: f32,
    pub end_x: f32,
}

impl FallPath {
    pub const fn new(start_x: f32, end_x: f32) -> Self {
        Self { start_x, end_x }
    }

    /// Horizontal position (percent) at `progress` in `[0, 1]`.
    pub fn x_at(&self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        self.start_x + (self.end_x - self.start_x) * t
    }
}

impl Default for FallPath {
    fn default() -> Self {
        Self::new(50.0, 50.0)
    }
}

/// Pluggable generator of fall paths.
pub trait FallEffect {
    /// One-time setup before the first path is requested.
    fn prepare(&mut self, _rng: &mut StdRng) {}

    /// Path for the next item entering the field.
    fn next_path(&mut self, rng: &mut StdRng) -> FallPath;
}

/// A fixed set of pre-generated keyframe paths; items pick one at random.
#[derive(Debug, Clone)]
pub struct KeyframePool {
    count: usize,
    variance: f32,
    start_range: (f32, f32),
    end_range: (f32, f32),
    paths: Vec<FallPath>,
}

impl KeyframePool {
    pub fn new(count: usize, variance: f32) -> Self {
        Self {
            count: count.max(1),
            variance,
            start_range: (3.0, 95.0),
            end_range: (2.0, 98.0),
            paths: Vec::new(),
        }
    }

    /// Unclamped variant used for background particles.
    pub fn unclamped(count: usize, variance: f32) -> Self {
        Self {
            start_range: (0.0, 100.0),
            end_range: (f32::MIN, f32::MAX),
            ..Self::new(count, variance)
        }
    }

    pub fn paths(&self) -> &[FallPath] {
        &self.paths
    }

    fn generate(&mut self, rng: &mut StdRng) {
        let (start_lo, start_hi) = self.start_range;
        let (end_lo, end_hi) = self.end_range;
        self.paths = (0..self.count)
            .map(|_| {
                let start = (rng.random::<f32>() * 100.0).clamp(start_lo, start_hi);
                let drift = rng.random::<f32>() * self.variance;
                let end = if rng.random_bool(0.5) { start + drift } else { start - drift };
                FallPath::new(start, end.clamp(end_lo, end_hi))
            })
            .collect();
    }
}

impl Default for KeyframePool {
    fn default() -> Self {
        Self::new(40, 15.0)
    }
}

impl FallEffect for KeyframePool {
    fn prepare(&mut self, rng: &mut StdRng) {
        self.generate(rng);
    }

    fn next_path(&mut self, rng: &mut StdRng) -> FallPath {
        if self.paths.is_empty() {
            self.generate(rng);
        }
        self.paths[rng.random_range(0..self.paths.len())]
    }
}

/// Every item falls straight down the same column.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightDown(pub FallPath);

impl FallEffect for StraightDown {
    fn next_path(&mut self, _rng: &mut StdRng) -> FallPath {
        self.0
    }
}
