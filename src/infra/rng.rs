use std::collections::VecDeque;

use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Normal;

use crate::engine::RandomSource;

/// Гауссовская выборка через `statrs`, с вырожденным случаем std_dev <= 0.
fn sample_gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    if !(std_dev > 0.0) || !std_dev.is_finite() {
        return mean;
    }
    match Normal::new(mean, std_dev) {
        Ok(normal) => normal.sample(rng),
        Err(_) => mean,
    }
}

/// Боевой RNG поверх `thread_rng`.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn next_index(&mut self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper.max(1))
    }

    fn next_gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        sample_gaussian(&mut rand::thread_rng(), mean, std_dev)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Одинаковый seed даёт одинаковые подсказки на одной и той же ленте тиков.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn next_index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper.max(1))
    }

    fn next_gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        sample_gaussian(&mut self.inner, mean, std_dev)
    }
}

/// RNG с заранее заданными ответами.
///
/// - `next_unit` отдаёт значения из очереди, затем `fallback_unit`;
/// - `next_gaussian` отдаёт значения из своей очереди, затем среднее.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    units: VecDeque<f64>,
    gaussians: VecDeque<f64>,
    fallback_unit: f64,
    units_drawn: usize,
}

impl Default for ScriptedRng {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self {
            units: VecDeque::new(),
            gaussians: VecDeque::new(),
            fallback_unit: 0.5,
            units_drawn: 0,
        }
    }

    /// Все вызовы `next_unit` возвращают `value`.
    pub fn constant(value: f64) -> Self {
        Self::new().with_fallback(value)
    }

    pub fn with_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
        self.units.extend(units);
        self
    }

    pub fn with_gaussians(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.gaussians.extend(values);
        self
    }

    pub fn with_fallback(mut self, value: f64) -> Self {
        self.fallback_unit = value.clamp(0.0, 1.0 - f64::EPSILON);
        self
    }

    /// Сколько раз уже спрашивали `next_unit`.
    pub fn units_drawn(&self) -> usize {
        self.units_drawn
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f64 {
        self.units_drawn += 1;
        self.units.pop_front().unwrap_or(self.fallback_unit)
    }

    fn next_index(&mut self, upper: usize) -> usize {
        let upper = upper.max(1);
        let idx = (self.next_unit() * upper as f64) as usize;
        idx.min(upper - 1)
    }

    fn next_gaussian(&mut self, mean: f64, _std_dev: f64) -> f64 {
        self.gaussians.pop_front().unwrap_or(mean)
    }
}

/// RNG по конфигурации: с seed — детерминированный, без — системный.
#[derive(Clone, Debug)]
pub enum ConfiguredRng {
    System(SystemRng),
    Seeded(DeterministicRng),
}

impl ConfiguredRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => ConfiguredRng::Seeded(DeterministicRng::from_seed(seed)),
            None => ConfiguredRng::System(SystemRng),
        }
    }
}

impl RandomSource for ConfiguredRng {
    fn next_unit(&mut self) -> f64 {
        match self {
            ConfiguredRng::System(rng) => rng.next_unit(),
            ConfiguredRng::Seeded(rng) => rng.next_unit(),
        }
    }

    fn next_index(&mut self, upper: usize) -> usize {
        match self {
            ConfiguredRng::System(rng) => rng.next_index(upper),
            ConfiguredRng::Seeded(rng) => rng.next_index(upper),
        }
    }

    fn next_gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        match self {
            ConfiguredRng::System(rng) => rng.next_gaussian(mean, std_dev),
            ConfiguredRng::Seeded(rng) => rng.next_gaussian(mean, std_dev),
        }
    }
}
