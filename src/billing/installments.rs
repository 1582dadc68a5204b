//! Splits a purchase total into per-installment amounts.

use thiserror::Error;

/// Maximum accepted drift between a custom-value sum and the purchase total.
pub const CUSTOM_SUM_TOLERANCE: f64 = 0.01;

#[derive(Debug, Error, PartialEq)]
pub enum InstallmentError {
    #[error("installment count must be at least 1, got {0}")]
    InvalidCount(u32),
    #[error("amounts must be finite numbers")]
    NonFiniteAmount,
    #[error("expected {expected} custom values, got {found}")]
    CountMismatch { expected: u32, found: usize },
    #[error("custom values sum to {sum:.2}, expected {total:.2} within one cent")]
    SumMismatch { sum: f64, total: f64 },
}

/// Splits `total` into `count` per-installment amounts.
///
/// Equal splits quantize each share to cents and fold the rounding remainder
/// into the first installment, so the group always reconstructs the total
/// exactly. Custom values must match `count` in length and sum to `total`
/// within [`CUSTOM_SUM_TOLERANCE`]; they are stored as given.
pub fn split_amounts(
    total: f64,
    count: u32,
    custom: Option<&[f64]>,
) -> Result<Vec<f64>, InstallmentError> {
    if count == 0 {
        return Err(InstallmentError::InvalidCount(count));
    }
    if !total.is_finite() {
        return Err(InstallmentError::NonFiniteAmount);
    }
    match custom {
        Some(values) => {
            if values.len() != count as usize {
                return Err(InstallmentError::CountMismatch {
                    expected: count,
                    found: values.len(),
                });
            }
            if values.iter().any(|value| !value.is_finite()) {
                return Err(InstallmentError::NonFiniteAmount);
            }
            let sum: f64 = values.iter().sum();
            // Epsilon keeps an exactly-one-cent drift on the accepted side.
            if (sum - total).abs() > CUSTOM_SUM_TOLERANCE + 1e-9 {
                return Err(InstallmentError::SumMismatch { sum, total });
            }
            Ok(values.to_vec())
        }
        None => {
            let share = round_cents(total / f64::from(count));
            let mut amounts = vec![share; count as usize];
            let tail: f64 = share * f64::from(count - 1);
            amounts[0] = round_cents(total - tail);
            Ok(amounts)
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
