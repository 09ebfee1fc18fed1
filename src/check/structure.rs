//! Checks that the sets are defined and that parameters are indexed by them.
use super::Findings;
use crate::id::IDCollection;
use crate::level::Level;
use crate::model::ModelData;
use itertools::Itertools;
use strum::IntoEnumIterator;

/// Check that the origin set and the facility set of every level are defined.
pub(super) fn check_set_definitions(data: &ModelData, findings: &mut Findings) {
    if data.origins.is_empty() {
        findings.error("Set I (origins) not found");
        return;
    }

    findings.info(format!("Set I: {} origins", data.origins.len()));

    for level in Level::iter() {
        let k = level.index();
        let facilities = &data.facilities[level];
        if facilities.all.is_empty() {
            findings.error(format!("Set L[{k}] (level {k} facilities) not found"));
            continue;
        }

        findings.info(format!("Set L[{k}]: {} facilities", facilities.all.len()));
        findings.info(format!(
            "  - {} existing, {} candidates",
            facilities.existing.len(),
            facilities.candidate_count()
        ));
    }
}

/// Check that demand and capacities only refer to members of the relevant sets.
pub(super) fn check_parameter_indices(data: &ModelData, findings: &mut Findings) {
    let invalid = data.origins.missing_from(data.demand.keys());
    if invalid.is_empty() {
        findings.info("All W indices are in set I");
    } else {
        findings.error(format!(
            "Demand W has invalid origins: [{}]",
            invalid.iter().join(", ")
        ));
    }

    for level in Level::iter() {
        let name = level.capacity_param();
        let invalid = data.facilities[level]
            .all
            .missing_from(data.capacities[level].keys());

        if invalid.is_empty() {
            findings.info(format!(
                "All {name} indices are in set L[{}]",
                level.index()
            ));
        } else {
            findings.error(format!(
                "{name} has invalid facilities: [{}]",
                invalid.iter().join(", ")
            ));
        }
    }
}
