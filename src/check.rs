//! Consistency checks for model data.
//!
//! Each check reads the [`ModelData`] and records any problems it finds as [`Finding`]s. Checks
//! never modify the data and do not depend on each other, so the order in which they are run only
//! affects the order of the report.
use crate::model::ModelData;
use log::debug;
use std::fmt;

mod balance;
mod structure;
mod values;

pub use balance::{
    CascadeFlows, FALLBACK_L1_STEP_DOWN_RATIO, FALLBACK_L2_STEP_DOWN_RATIO,
    FALLBACK_L3_STEP_DOWN_RATIO,
};
pub use values::{MIN_CAPACITY, recommended_min_capacity};

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The data cannot be used as it is
    Error,
    /// Something looks wrong, but the data can still be used
    Warning,
    /// Informational only
    Info,
}

/// Something a check has to report about the data
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    /// How serious the finding is
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
}

/// The findings of all checks, in the order they were made
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Findings(Vec<Finding>);

impl Findings {
    fn push(&mut self, severity: Severity, message: String) {
        self.0.push(Finding { severity, message });
    }

    /// Record an error
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message.into());
    }

    /// Record a warning
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message.into());
    }

    /// Record some information
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message.into());
    }

    /// Iterate over the messages of findings with the given severity, in order
    pub fn messages(&self, severity: Severity) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(move |finding| finding.severity == severity)
            .map(|finding| finding.message.as_str())
    }

    /// Count the findings with the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.messages(severity).count()
    }

    /// The overall outcome
    pub fn verdict(&self) -> Verdict {
        if self.count(Severity::Error) > 0 {
            Verdict::Failed
        } else if self.count(Severity::Warning) > 0 {
            Verdict::PassedWithWarnings
        } else {
            Verdict::Passed
        }
    }
}

/// The overall outcome of validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No errors or warnings
    Passed,
    /// Warnings, but no errors
    PassedWithWarnings,
    /// At least one error
    Failed,
}

impl Verdict {
    /// Whether the data can be passed on to the optimiser
    pub fn is_success(self) -> bool {
        self != Self::Failed
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "✓ PASSED - Data is valid"),
            Self::PassedWithWarnings => write!(f, "⚠ PASSED WITH WARNINGS"),
            Self::Failed => write!(f, "❌ FAILED - Fix errors before running model"),
        }
    }
}

/// A function which checks one aspect of the data
type Check = fn(&ModelData, &mut Findings);

/// All checks, with their names, in the order they are run
const CHECKS: [(&str, Check); 8] = [
    ("Set Definitions", structure::check_set_definitions),
    ("Parameter Index Consistency", structure::check_parameter_indices),
    ("Capacity Values", values::check_capacity_values),
    ("Distance Parameters", values::check_distance_parameters),
    ("Step-Down Ratios", values::check_step_down_ratios),
    ("Demand Feasibility", values::check_demand_feasibility),
    ("Facility Connectivity", values::check_facility_connectivity),
    ("Network Balance", balance::check_network_balance),
];

/// Run all checks on the data.
pub fn run_all_checks(data: &ModelData) -> Findings {
    let mut findings = Findings::default();
    for (number, (name, check)) in CHECKS.iter().enumerate() {
        debug!("[CHECK {}] {name}", number + 1);
        check(data, &mut findings);
    }

    findings
}
