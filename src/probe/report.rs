//! Probe outcomes and aggregate report.

use std::fmt;

use super::checks::Endpoint;

/// Result of one check against one target.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    /// Base URL of the target.
    pub target: String,
    /// Endpoint checked.
    pub endpoint: Endpoint,
    /// HTTP status, if a response arrived.
    pub status: Option<u16>,
    /// Round-trip time in milliseconds.
    pub elapsed_ms: f64,
    /// Failure reason; `None` means the check passed.
    pub failure: Option<String>,
}

impl CheckOutcome {
    /// Whether the check passed.
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.passed() { "PASS" } else { "FAIL" };
        write!(f, "{verdict} {} {}", self.target, self.endpoint)?;
        if let Some(status) = self.status {
            write!(f, " [{status}]")?;
        }
        write!(f, " ({:.0}ms)", self.elapsed_ms)?;
        if let Some(reason) = &self.failure {
            write!(f, ": {reason}")?;
        }
        Ok(())
    }
}

/// All outcomes of one probe run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeReport {
    /// Outcomes in target order, then endpoint order.
    pub outcomes: Vec<CheckOutcome>,
}

impl ProbeReport {
    /// Number of passed checks.
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Failed checks.
    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    /// True when every check passed.
    pub fn all_passed(&self) -> bool {
        self.failures().next().is_none()
    }

    /// True when at least one failure is on an optional route.
    pub fn has_optional_failures(&self) -> bool {
        self.failures().any(|o| o.endpoint.is_optional())
    }

    /// One-line summary.
    pub fn summary(&self) -> String {
        let total = self.outcomes.len();
        let passed = self.passed_count();
        let mut line = format!("{passed}/{total} checks passed");
        if self.has_optional_failures() {
            line.push_str(" (GET /ping is optional on some services)");
        }
        line
    }
}
