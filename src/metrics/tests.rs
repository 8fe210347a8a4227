use std::time::Duration;

use super::*;

#[test]
fn success_ratio_rejects_empty_trials() -> Result<(), String> {
    if SuccessRatio::new(0, 0).is_some() {
        return Err("Zero-iteration ratio must be rejected".to_owned());
    }
    if SuccessRatio::new(3, 2).is_some() {
        return Err("More successes than calls must be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn success_ratio_percent_uses_integer_scaling() -> Result<(), String> {
    let ratio = SuccessRatio::new(2, 3).ok_or("Expected ratio")?;
    if ratio.percent_x100() != 6666 {
        return Err(format!("Unexpected percent: {}", ratio.percent_x100()));
    }
    if ratio.failures() != 1 || ratio.is_complete() {
        return Err("Unexpected failure accounting".to_owned());
    }
    let full = SuccessRatio::new(10, 10).ok_or("Expected ratio")?;
    if full.percent_x100() != 10_000 || !full.is_complete() {
        return Err("Expected full ratio".to_owned());
    }
    Ok(())
}

#[test]
fn success_ratio_fraction_bounds() -> Result<(), String> {
    let none = SuccessRatio::new(0, 4).ok_or("Expected ratio")?;
    let half = SuccessRatio::new(2, 4).ok_or("Expected ratio")?;
    let all = SuccessRatio::new(4, 4).ok_or("Expected ratio")?;
    let values = [none.as_f64(), half.as_f64(), all.as_f64()];
    if values != [0.0, 0.5, 1.0] {
        return Err(format!("Unexpected fractions: {:?}", values));
    }
    Ok(())
}

#[test]
fn run_log_preserves_order() -> Result<(), String> {
    let mut log = RunLog::new();
    if !log.is_empty() {
        return Err("Expected empty log".to_owned());
    }
    for (successes, total) in [(1, 1), (0, 5), (3, 4)] {
        log.push(SuccessRatio::new(successes, total).ok_or("Expected ratio")?);
    }
    if log.len() != 3 {
        return Err(format!("Unexpected length: {}", log.len()));
    }
    if log.snapshot() != [1.0, 0.0, 0.75] {
        return Err(format!("Unexpected snapshot: {:?}", log.snapshot()));
    }
    Ok(())
}

#[test]
fn histogram_percentiles_track_recorded_latencies() -> Result<(), String> {
    let mut hist = LatencyHistogram::new()?;
    if hist.percentiles() != LatencyPercentiles::default() {
        return Err("Empty histogram should report zeros".to_owned());
    }
    for micros in 1..=100_u64 {
        hist.record(Duration::from_micros(micros.saturating_mul(10)))?;
    }
    let percentiles = hist.percentiles();
    if !(495..=505).contains(&percentiles.p50_us) {
        return Err(format!("Unexpected p50: {}", percentiles.p50_us));
    }
    if percentiles.p99_us < percentiles.p90_us || percentiles.max_us < percentiles.p99_us {
        return Err(format!("Percentiles not ordered: {:?}", percentiles));
    }
    Ok(())
}

#[test]
fn histogram_merge_adds_counts() -> Result<(), String> {
    let mut left = LatencyHistogram::new()?;
    let mut right = LatencyHistogram::new()?;
    left.record(Duration::from_micros(5))?;
    right.record(Duration::from_micros(7))?;
    right.record(Duration::ZERO)?;
    left.merge(&right)?;
    if left.count() != 3 {
        return Err(format!("Unexpected count: {}", left.count()));
    }
    Ok(())
}
