// File: crates/capture-core/src/grid.rs
// Summary: Simple grid/tick layout helpers.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Tick values for an axis range, with the label text used beside each tick.
pub fn ticks(min: f64, max: f64, count: usize) -> Vec<(f64, String)> {
    let span = (max - min).abs();
    let decimals = if span >= 100.0 { 0 } else if span >= 10.0 { 1 } else { 2 };
    linspace(min, max, count)
        .into_iter()
        .map(|v| (v, format!("{v:.decimals$}")))
        .collect()
}
