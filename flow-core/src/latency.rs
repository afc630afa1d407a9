use std::time::Duration;

use crate::task::TaskType;

/// Simulated wait for a call to a third-party service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedLatency {
    scale: f64,
}

impl SimulatedLatency {
    pub fn new(scale: f64) -> Self {
        Self {
            scale: if scale.is_finite() { scale.max(0.0) } else { 0.0 },
        }
    }

    /// No waiting at all.
    pub fn instant() -> Self {
        Self { scale: 0.0 }
    }

    /// Scaled duration in milliseconds for a base delay.
    pub fn scaled_ms(&self, base_ms: u64) -> u64 {
        (base_ms as f64 * self.scale).round() as u64
    }

    pub async fn pause(&self, base_ms: u64) {
        let ms = self.scaled_ms(base_ms);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Base processing time an agent spends on a task type, before scaling.
pub fn base_processing_ms(task_type: &TaskType) -> u64 {
    match task_type {
        TaskType::DiscoverCreators => 2000,
        TaskType::SendOutreach => 1500,
        TaskType::GenerateContract => 2500,
        TaskType::ProcessPayment => 1000,
        TaskType::AnalyzePerformance => 3000,
        TaskType::UpdateCrm => 800,
        _ => 1500,
    }
}
