//! Check that facility capacity can absorb the patient flows through the care cascade.
//!
//! All demand enters at level 1. At each level a proportion of patients (the step-down ratio)
//! leaves the cascade and the rest are transferred onwards:
//!
//! ```text
//! transfers_l1 = D * (1 - r1)
//! transfers_l2 = transfers_l1 * (1 - r2)     retained_l2 = transfers_l1 * r2
//!                                            retained_l3 = transfers_l2 * r3
//! ```
//!
//! Level 2 must have capacity for `retained_l2 + transfers_l2` patients and level 3 for
//! `retained_l3`.
use super::Findings;
use crate::level::{Level, PerLevel};
use crate::model::ModelData;
use crate::units::{Dimensionless, Patients};

/// Step-down ratio assumed for level 1 if `O1_0` is not given
pub const FALLBACK_L1_STEP_DOWN_RATIO: Dimensionless = Dimensionless(0.29);

/// Step-down ratio assumed for level 2 if `O2_0` is not given
pub const FALLBACK_L2_STEP_DOWN_RATIO: Dimensionless = Dimensionless(0.65);

/// Step-down ratio assumed for level 3 if `O3_0` is not given
pub const FALLBACK_L3_STEP_DOWN_RATIO: Dimensionless = Dimensionless(0.80);

/// Get the step-down ratio assumed for a level when none is given
fn fallback_step_down_ratio(level: Level) -> Dimensionless {
    match level {
        Level::L1 => FALLBACK_L1_STEP_DOWN_RATIO,
        Level::L2 => FALLBACK_L2_STEP_DOWN_RATIO,
        Level::L3 => FALLBACK_L3_STEP_DOWN_RATIO,
    }
}

/// Estimated patient flows through the cascade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeFlows {
    /// Patients transferred from level 1 to levels 2 or 3
    pub transfers_l1: Patients,
    /// Patients transferred from level 2 to level 3
    pub transfers_l2: Patients,
    /// Patients who stay at level 2
    pub retained_l2: Patients,
    /// Patients who stay at level 3
    pub retained_l3: Patients,
}

impl CascadeFlows {
    /// Calculate the flows for the given total demand and step-down ratio of each level
    pub fn new(total_demand: Patients, ratios: &PerLevel<Dimensionless>) -> Self {
        let transfers_l1 = total_demand * ratios[Level::L1].complement();
        let transfers_l2 = transfers_l1 * ratios[Level::L2].complement();

        Self {
            transfers_l1,
            transfers_l2,
            retained_l2: transfers_l1 * ratios[Level::L2],
            retained_l3: transfers_l2 * ratios[Level::L3],
        }
    }

    /// Calculate the flows using the mean step-down ratio of each level.
    ///
    /// Levels without step-down ratios use the fallback ratio.
    pub fn from_data(data: &ModelData) -> Self {
        let ratios = PerLevel::from_fn(|level| {
            data.step_down_stats(level).map_or_else(
                || fallback_step_down_ratio(level),
                |stats| Dimensionless(stats.mean),
            )
        });
        let total_demand = data.demand.values().sum();

        Self::new(total_demand, &ratios)
    }

    /// Capacity needed at level 2
    pub fn required_l2(&self) -> Patients {
        self.retained_l2 + self.transfers_l2
    }

    /// Capacity needed at level 3
    pub fn required_l3(&self) -> Patients {
        self.retained_l3
    }
}

/// Check that there is enough capacity at levels 2 and 3 for the flows through the cascade.
///
/// Only runs if demand and capacities for levels 2 and 3 are all present.
pub(super) fn check_network_balance(data: &ModelData, findings: &mut Findings) {
    if data.demand.is_empty()
        || data.capacities[Level::L2].is_empty()
        || data.capacities[Level::L3].is_empty()
    {
        return;
    }

    let total_demand: Patients = data.demand.values().sum();
    let total_capacity =
        PerLevel::from_fn(|level| data.capacities[level].values().sum::<Patients>());
    findings.info(format!("Total demand: {total_demand}"));
    findings.info(format!(
        "Total capacity: C2={}, C3={}",
        total_capacity[Level::L2],
        total_capacity[Level::L3]
    ));

    let flows = CascadeFlows::from_data(data);
    findings.info(format!("L1→L2/L3: {:.0} patients", flows.transfers_l1.value()));
    findings.info(format!("L2→L3: {:.0} patients", flows.transfers_l2.value()));
    findings.info(format!(
        "L2 required capacity: {:.0}",
        flows.required_l2().value()
    ));
    findings.info(format!(
        "L3 required capacity: {:.0}",
        flows.required_l3().value()
    ));

    for (level, required) in [
        (Level::L2, flows.required_l2()),
        (Level::L3, flows.required_l3()),
    ] {
        let available = total_capacity[level];
        if data.facilities[level].all.is_empty() {
            findings.error(format!("No {level} facilities defined"));
        } else if required > available {
            findings.error(format!(
                "{level} insufficient: {:.0} > {available}",
                required.value()
            ));
        } else {
            findings.info(format!("{level} capacity sufficient"));
        }
    }
}
