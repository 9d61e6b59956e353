use crate::engine::RandomSource;

/// Усечённое нормальное: N(mean, ((upper - lower) / 6)²), затем clamp в [lower, upper].
///
/// Почти вся масса и так внутри границ, clamp только отрезает хвосты.
pub fn truncated_normal<R: RandomSource>(rng: &mut R, mean: f64, lower: f64, upper: f64) -> f64 {
    let (lower, upper) = if lower <= upper {
        (lower, upper)
    } else {
        (upper, lower)
    };
    let std_dev = (upper - lower) / 6.0;
    rng.next_gaussian(mean, std_dev).clamp(lower, upper)
}

/// Выборка с центром посередине диапазона.
pub fn centered_sample<R: RandomSource>(rng: &mut R, lower: f64, upper: f64) -> f64 {
    truncated_normal(rng, (lower + upper) / 2.0, lower, upper)
}
