use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::colorization::common::error::Result;

/// Losses recorded at the end of one epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    pub epoch: usize,
    /// Mean of the per-batch training losses.
    pub train_loss: f64,
    /// Sum of per-batch validation losses divided by the number of batches.
    pub val_loss: f64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    epochs: Vec<EpochStats>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, epoch: usize, train_loss: f64, val_loss: f64, elapsed: Duration) {
        self.epochs.push(EpochStats {
            epoch,
            train_loss,
            val_loss,
            elapsed_ms: elapsed.as_millis() as u64,
        });
    }

    pub fn epochs(&self) -> &[EpochStats] {
        &self.epochs
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn train_losses(&self) -> Vec<f64> {
        self.epochs.iter().map(|e| e.train_loss).collect()
    }

    pub fn val_losses(&self) -> Vec<f64> {
        self.epochs.iter().map(|e| e.val_loss).collect()
    }

    pub fn last(&self) -> Option<&EpochStats> {
        self.epochs.last()
    }

    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(self.epochs.iter().map(|e| e.elapsed_ms).sum())
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> TrainingHistory {
        let mut h = TrainingHistory::new();
        h.record(0, 4.0, 5.0, Duration::from_millis(30));
        h.record(1, 2.0, 3.0, Duration::from_millis(20));
        h
    }

    #[test]
    fn curves_follow_epoch_order() {
        let h = history();
        assert_eq!(h.train_losses(), vec![4.0, 2.0]);
        assert_eq!(h.val_losses(), vec![5.0, 3.0]);
        assert_eq!(h.last().unwrap().epoch, 1);
        assert_eq!(h.total_duration(), Duration::from_millis(50));
    }

    #[test]
    fn saves_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        history().save_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let loaded: TrainingHistory = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded, history());
    }
}
