//! Failure categorization for scenario runs
//!
//! - Setup: the scenario could not be turned into a supervisor
//! - Workflow: stages ran in the wrong order or the wrong number
//! - Outcome: final campaign state differs from expectations

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// Invalid scenario configuration or agent line-up
    Setup,
    /// Recorded workflow stages differ from expected
    Workflow,
    /// Campaign status, error or bookkeeping differ from expected
    Outcome,
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCategory::Setup => write!(f, "Setup"),
            FailureCategory::Workflow => write!(f, "Workflow"),
            FailureCategory::Outcome => write!(f, "Outcome"),
        }
    }
}

/// A failure with category and details
#[derive(Debug, Clone)]
pub struct CategorizedFailure {
    pub category: FailureCategory,
    /// Short description of what failed
    pub message: String,
    pub details: Option<String>,
}

impl CategorizedFailure {
    pub fn new(category: FailureCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn setup_failed(details: impl Into<String>) -> Self {
        Self::new(FailureCategory::Setup, "Supervisor setup failed").with_details(details)
    }

    pub fn stage_mismatch(expected: &[String], actual: &[String]) -> Self {
        Self::new(FailureCategory::Workflow, "Workflow stages mismatch").with_details(format!(
            "Expected: [{}], Actual: [{}]",
            expected.join(", "),
            actual.join(", ")
        ))
    }

    pub fn status_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(FailureCategory::Outcome, "Final status mismatch").with_details(format!(
            "Expected: {}, Actual: {}",
            expected.into(),
            actual.into()
        ))
    }

    /// The campaign error does not mention the expected text.
    pub fn error_mismatch(expected: impl Into<String>, actual: Option<&str>) -> Self {
        Self::new(FailureCategory::Outcome, "Campaign error mismatch").with_details(format!(
            "Expected to contain: {}, Actual: {}",
            expected.into(),
            actual.unwrap_or("<none>")
        ))
    }

    pub fn task_count_mismatch(expected: usize, actual: usize) -> Self {
        Self::new(
            FailureCategory::Outcome,
            format!(
                "Wrong completed task count: expected {}, got {}",
                expected, actual
            ),
        )
    }
}

impl fmt::Display for CategorizedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " - {}", details)?;
        }
        Ok(())
    }
}
