//! Simulated model retraining.
//!
//! Nothing is retrained: a request records a fabricated accuracy in
//! `retrain_logs` and the served model stays exactly as loaded at startup.
//! Responses carry `"simulated": true` so clients cannot mistake it for a
//! real training run.

pub mod handlers;
pub mod store;

use rand::Rng;

use crate::inference::round2;

/// Training source recorded when no dataset file is uploaded.
pub const DEFAULT_TRAINING_SOURCE: &str = "default dataset";

/// Bounds of the fabricated accuracy, in percent.
pub const ACCURACY_RANGE: (f64, f64) = (93.0, 97.0);

/// Draws a fake accuracy uniformly from `ACCURACY_RANGE`, rounded to 2 decimals.
pub fn simulated_accuracy<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let (low, high) = ACCURACY_RANGE;
    round2(rng.gen_range(low..=high))
}

/// Picks the training source from an uploaded filename, falling back to the default.
pub fn training_source(file_name: Option<&str>) -> String {
    match file_name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_TRAINING_SOURCE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_stays_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let acc = simulated_accuracy(&mut rng);
            assert!((93.0..=97.0).contains(&acc), "{acc}");
            assert_eq!(round2(acc), acc);
        }
    }

    #[test]
    fn test_training_source_defaults() {
        assert_eq!(training_source(None), "default dataset");
        assert_eq!(training_source(Some("")), "default dataset");
        assert_eq!(training_source(Some("jobs_2024.csv")), "jobs_2024.csv");
    }
}
