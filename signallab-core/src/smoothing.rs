//! Smoothing primitives shared by every indicator.
//!
//! Series are `&[Option<f64>]`; `None` marks an undefined value (warm-up or
//! missing history). Every function returns a fresh vector of the same length
//! and never panics: an empty input or a zero period yields an all-`None`
//! output.
//!
//! Recursive filters (EMA, Wilder) skip leading `None`s. Once seeded, a `None`
//! input ends the recursion: that index and every later one are `None`.

/// Guard added to denominators that can collapse to zero.
pub const EPSILON: f64 = 1e-12;

/// Lift a fully defined column into a series.
pub fn defined(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().map(|&v| Some(v)).collect()
}

/// Element-wise combination of two series; `None` wherever either side is `None`.
pub fn combine<F>(a: &[Option<f64>], b: &[Option<f64>], f: F) -> Vec<Option<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    a.iter()
        .zip(b)
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some(f(*x, *y)),
            _ => None,
        })
        .collect()
}

/// Apply `f` to every trailing window of `period` values.
///
/// A window is defined only when all of its values are defined, so a gap
/// suppresses the `period` outputs that overlap it and the series recovers
/// afterwards.
pub fn rolling<F>(series: &[Option<f64>], period: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let n = series.len();
    let mut out = vec![None; n];
    if period == 0 || n < period {
        return out;
    }

    let mut window = Vec::with_capacity(period);
    for i in (period - 1)..n {
        window.clear();
        window.extend(series[i + 1 - period..=i].iter().map_while(|v| *v));
        if window.len() == period {
            out[i] = f(&window);
        }
    }
    out
}

/// Simple moving average; undefined for indices `< period - 1`.
pub fn sma(series: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    rolling(series, period, |w| Some(mean(w)))
}

pub fn rolling_sum(series: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    rolling(series, period, |w| Some(w.iter().sum()))
}

pub fn rolling_min(series: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    rolling(series, period, |w| w.iter().copied().reduce(f64::min))
}

pub fn rolling_max(series: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    rolling(series, period, |w| w.iter().copied().reduce(f64::max))
}

/// Variance convention for rolling standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdKind {
    /// Divide by N.
    Population,
    /// Divide by N - 1; undefined for a one-value window.
    Sample,
}

pub fn rolling_std(series: &[Option<f64>], period: usize, kind: StdKind) -> Vec<Option<f64>> {
    rolling(series, period, |w| std_dev(w, kind))
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn std_dev(values: &[f64], kind: StdKind) -> Option<f64> {
    let n = values.len();
    let denom = match kind {
        StdKind::Population => n,
        StdKind::Sample => n.checked_sub(1)?,
    };
    if denom == 0 {
        return None;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / denom as f64).sqrt())
}

/// Exponential moving average, `alpha = 2 / (period + 1)`, seeded with the
/// first defined value.
pub fn ema(series: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; series.len()];
    }
    let alpha = 2.0 / (period as f64 + 1.0);
    recursive(series, 1, |seed| seed[0], |prev, x| alpha * x + (1.0 - alpha) * prev)
}

/// Wilder's smoothing, `alpha = 1 / period`, seeded with the simple mean of the
/// first `period` defined values.
pub fn wilder(series: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; series.len()];
    }
    let p = period as f64;
    recursive(series, period, mean, |prev, x| prev + (x - prev) / p)
}

/// Shared fold for seeded recursive filters.
///
/// Skips leading `None`s, seeds from the next `seed_len` values (which must all
/// be defined) and then applies `step`. Any later `None` ends the fold.
fn recursive<S, F>(series: &[Option<f64>], seed_len: usize, seed: S, step: F) -> Vec<Option<f64>>
where
    S: Fn(&[f64]) -> f64,
    F: Fn(f64, f64) -> f64,
{
    let n = series.len();
    let mut out = vec![None; n];
    let Some(start) = series.iter().position(Option::is_some) else {
        return out;
    };
    let seed_end = start + seed_len - 1;
    if seed_end >= n {
        return out;
    }

    let seed_values: Vec<f64> = series[start..=seed_end].iter().map_while(|v| *v).collect();
    if seed_values.len() != seed_len {
        return out;
    }

    let mut prev = seed(&seed_values);
    out[seed_end] = Some(prev);
    for i in (seed_end + 1)..n {
        match series[i] {
            Some(x) => {
                prev = step(prev, x);
                out[i] = Some(prev);
            }
            None => break,
        }
    }
    out
}
