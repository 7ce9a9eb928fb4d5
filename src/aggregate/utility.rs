/// Sums `value / population` over `values`. Returns 0.0 when `population` is 0.
///
/// The divisor is the whole population even if `values` yields fewer items,
/// so missing values pull the mean down instead of being ignored.
pub fn population_mean(values: impl IntoIterator<Item = f64>, population: usize) -> f64 {
    if population == 0 {
        return 0.0;
    }
    let n = population as f64;
    values.into_iter().map(|v| v / n).sum()
}
