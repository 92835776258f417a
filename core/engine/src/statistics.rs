//! FILENAME: core/engine/src/statistics.rs
//! PURPOSE: Statistical operations over sequences of numbers.
//! CONTEXT: All functions reject an empty input with a domain error.
//! Variance and standard deviation use the population formulas (divide
//! by N, not N-1). Mode breaks frequency ties by first-encountered order.

use crate::error::{CalcError, Result};

fn require_non_empty(numbers: &[f64]) -> Result<()> {
    if numbers.is_empty() {
        Err(CalcError::domain("Statistics require a non-empty sequence"))
    } else {
        Ok(())
    }
}

/// Arithmetic mean.
pub fn mean(numbers: &[f64]) -> Result<f64> {
    require_non_empty(numbers)?;
    Ok(numbers.iter().sum::<f64>() / numbers.len() as f64)
}

/// Median: middle element of the sorted sequence, or the average of the
/// two middle elements when the count is even.
pub fn median(numbers: &[f64]) -> Result<f64> {
    require_non_empty(numbers)?;

    let mut sorted = numbers.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    if n % 2 == 0 {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Ok(sorted[n / 2])
    }
}

/// Mode: the value with the highest frequency. When several values tie,
/// the one encountered first in the input wins.
pub fn mode(numbers: &[f64]) -> Result<f64> {
    require_non_empty(numbers)?;

    // Counts in first-encountered order; f64 keys rule out a HashMap.
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for &x in numbers {
        match counts.iter_mut().find(|(v, _)| *v == x) {
            Some((_, count)) => *count += 1,
            None => counts.push((x, 1)),
        }
    }

    let max_count = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let (value, _) = counts
        .iter()
        .find(|(_, c)| *c == max_count)
        .copied()
        .unwrap_or((0.0, 0));

    Ok(value)
}

/// Population variance: sum of squared deviations divided by N.
pub fn variance(numbers: &[f64]) -> Result<f64> {
    let m = mean(numbers)?;
    let sum_sq: f64 = numbers.iter().map(|x| (x - m) * (x - m)).sum();
    Ok(sum_sq / numbers.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(numbers: &[f64]) -> Result<f64> {
    Ok(variance(numbers)?.sqrt())
}

/// Sum of all elements.
pub fn sum(numbers: &[f64]) -> Result<f64> {
    require_non_empty(numbers)?;
    Ok(numbers.iter().sum())
}

/// Product of all elements.
pub fn product(numbers: &[f64]) -> Result<f64> {
    require_non_empty(numbers)?;
    Ok(numbers.iter().product())
}

/// Smallest element.
pub fn min(numbers: &[f64]) -> Result<f64> {
    require_non_empty(numbers)?;
    Ok(numbers.iter().cloned().fold(f64::INFINITY, f64::min))
}

/// Largest element.
pub fn max(numbers: &[f64]) -> Result<f64> {
    require_non_empty(numbers)?;
    Ok(numbers.iter().cloned().fold(f64::NEG_INFINITY, f64::max))
}

/// Difference between the largest and smallest elements.
pub fn range(numbers: &[f64]) -> Result<f64> {
    Ok(max(numbers)? - min(numbers)?)
}
