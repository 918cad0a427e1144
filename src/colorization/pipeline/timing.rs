use std::time::{Duration, Instant};

use tracing::info;

/// Time spent in one pipeline stage.
#[derive(Debug, Clone, Copy)]
pub struct StageTiming {
    pub stage: &'static str,
    pub duration: Duration,
}

/// Wall-clock time per stage, in execution order.
#[derive(Debug, Default)]
pub struct PipelineTimings {
    stages: Vec<StageTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops `timer` and keeps its stage.
    pub fn record(&mut self, timer: Timer) {
        self.stages.push(StageTiming {
            stage: timer.stage,
            duration: timer.started.elapsed(),
        });
    }

    pub fn stages(&self) -> &[StageTiming] {
        &self.stages
    }

    pub fn total(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    /// One log line per stage with its share of the run.
    pub fn log_summary(&self) {
        let total = self.total().as_secs_f64();
        for s in &self.stages {
            let secs = s.duration.as_secs_f64();
            let share = if total > 0.0 { secs / total * 100.0 } else { 0.0 };
            info!(stage = s.stage, secs, share = format!("{:.1}%", share), "Stage timing");
        }
        info!(secs = total, "Pipeline total");
    }
}

/// Started at the top of a stage, handed to [`PipelineTimings::record`] at its end.
pub struct Timer {
    stage: &'static str,
    started: Instant,
}

impl Timer {
    pub fn start(stage: &'static str) -> Self {
        Self {
            stage,
            started: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_keep_execution_order() {
        let mut timings = PipelineTimings::new();
        timings.record(Timer::start("load"));
        timings.record(Timer::start("train"));

        let names: Vec<&str> = timings.stages().iter().map(|s| s.stage).collect();
        assert_eq!(names, vec!["load", "train"]);
    }

    #[test]
    fn total_covers_every_stage() {
        let mut timings = PipelineTimings::new();
        let timer = Timer::start("preprocess");
        std::thread::sleep(Duration::from_millis(2));
        timings.record(timer);

        assert!(timings.total() >= Duration::from_millis(2));
        assert_eq!(timings.total(), timings.stages()[0].duration);
    }
}
