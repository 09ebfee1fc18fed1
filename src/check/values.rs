//! Checks on the values of individual parameter tables.
use super::Findings;
use crate::level::Level;
use crate::model::ModelData;
use itertools::Itertools;
use strum::IntoEnumIterator;

/// The smallest capacity a facility can realistically have
pub const MIN_CAPACITY: f64 = 100.0;

/// The capacity we recommend facilities at a level have as a minimum
pub fn recommended_min_capacity(level: Level) -> f64 {
    match level {
        Level::L1 | Level::L3 => 500.0,
        Level::L2 => 1000.0,
    }
}

/// Check that capacities are not unrealistically small.
pub(super) fn check_capacity_values(data: &ModelData, findings: &mut Findings) {
    for level in Level::iter() {
        let Some(stats) = data.capacity_stats(level) else {
            continue;
        };

        let name = level.capacity_param();
        findings.info(format!("{name}: min={}, max={}", stats.min, stats.max));

        if stats.min < MIN_CAPACITY {
            findings.error(format!(
                "{name} capacity unrealistically small (min={}). Recommend {name} >= {}.",
                stats.min,
                recommended_min_capacity(level)
            ));
        }
    }
}

/// Check that the distance matrices and maximum distances are defined.
pub(super) fn check_distance_parameters(data: &ModelData, findings: &mut Findings) {
    for level in Level::iter() {
        let name = level.distance_param();
        let coverage = data.distances[level];
        if coverage.is_empty() {
            findings.warning(format!("{name} not found"));
        } else {
            findings.info(format!("{name} defined ({} entries)", coverage.entries));
        }
    }

    if !data.max_distance.is_empty() {
        findings.info(format!(
            "Dmax defined for {} levels",
            data.max_distance.len()
        ));
    }
}

/// Check that step-down ratios are present and are proper fractions.
pub(super) fn check_step_down_ratios(data: &ModelData, findings: &mut Findings) {
    for level in Level::iter() {
        let name = level.ratio_param();
        let Some(stats) = data.step_down_stats(level) else {
            findings.warning(format!("{name} not found"));
            continue;
        };

        findings.info(format!(
            "{name}: min={:.2}, max={:.2}, avg={:.2}",
            stats.min, stats.max, stats.mean
        ));

        let in_range = |ratio: f64| ratio > 0.0 && ratio < 1.0;
        if !(in_range(stats.min) && in_range(stats.max)) {
            findings.warning(format!(
                "{name} has values outside (0, 1): min={}, max={}",
                stats.min, stats.max
            ));
        }
    }
}

/// Summarise total demand and its distribution across origins.
///
/// Demand can't be negative, so origins with negative weights are reported as a warning.
pub(super) fn check_demand_feasibility(data: &ModelData, findings: &mut Findings) {
    let Some(stats) = data.demand_stats() else {
        return;
    };

    findings.info(format!("Total demand: {}", stats.total));
    findings.info(format!("Range: [{}, {}]", stats.min, stats.max));
    findings.info(format!("Average: {:.1}", stats.mean));

    let negative = data
        .demand
        .iter()
        .filter(|(_, weight)| weight.value() < 0.0)
        .map(|(id, _)| id)
        .collect_vec();
    if !negative.is_empty() {
        findings.warning(format!(
            "Demand W has negative values: [{}]",
            negative.iter().join(", ")
        ));
    }
}

/// Report how much of each distance matrix is actually populated.
pub(super) fn check_facility_connectivity(data: &ModelData, findings: &mut Findings) {
    for level in Level::iter() {
        let coverage = data.distances[level];
        if coverage.is_empty() {
            continue;
        }

        findings.info(format!(
            "{} coverage: {}/{}",
            level.distance_param(),
            coverage.populated,
            coverage.entries
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Severity;
    use crate::fixture::valid_data;
    use crate::model::DistanceCoverage;
    use crate::units::{Dimensionless, Patients};
    use rstest::rstest;

    fn run(check: fn(&ModelData, &mut Findings), data: &ModelData) -> Findings {
        let mut findings = Findings::default();
        check(data, &mut findings);
        findings
    }

    #[rstest]
    fn test_check_capacity_values_valid(valid_data: ModelData) {
        let findings = run(check_capacity_values, &valid_data);
        assert_eq!(findings.count(Severity::Error), 0);
        assert_eq!(findings.count(Severity::Info), 3);
    }

    #[rstest]
    #[case(Level::L1, "C1 capacity unrealistically small (min=50). Recommend C1 >= 500.")]
    #[case(Level::L2, "C2 capacity unrealistically small (min=50). Recommend C2 >= 1000.")]
    fn test_check_capacity_values_too_small(
        mut valid_data: ModelData,
        #[case] level: Level,
        #[case] expected: &str,
    ) {
        valid_data.capacities[level].insert("H1".into(), Patients(50.0));
        let findings = run(check_capacity_values, &valid_data);
        assert!(findings.messages(Severity::Error).eq([expected]));
    }

    #[rstest]
    fn test_check_capacity_values_at_floor(mut valid_data: ModelData) {
        valid_data.capacities[Level::L3].insert("X1".into(), Patients(MIN_CAPACITY));
        let findings = run(check_capacity_values, &valid_data);
        assert_eq!(findings.count(Severity::Error), 0);
    }

    #[rstest]
    fn test_check_distance_parameters(mut valid_data: ModelData) {
        valid_data.distances[Level::L2] = DistanceCoverage::default();
        valid_data.max_distance.clear();
        let findings = run(check_distance_parameters, &valid_data);
        assert!(findings.messages(Severity::Warning).eq(["D0_2 not found"]));
        assert_eq!(findings.count(Severity::Info), 2);
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(-0.1)]
    #[case(1.5)]
    #[case(f64::NAN)]
    fn test_check_step_down_ratios_out_of_range(mut valid_data: ModelData, #[case] ratio: f64) {
        valid_data.step_down_ratios[Level::L1].insert("H2".into(), Dimensionless(ratio));
        let findings = run(check_step_down_ratios, &valid_data);
        assert_eq!(findings.count(Severity::Error), 0);
        let warnings = findings.messages(Severity::Warning).collect_vec();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("O1_0 has values outside (0, 1)"));
    }

    #[rstest]
    fn test_check_step_down_ratios_missing(mut valid_data: ModelData) {
        valid_data.step_down_ratios[Level::L3].clear();
        let findings = run(check_step_down_ratios, &valid_data);
        assert_eq!(findings.count(Severity::Error), 0);
        assert!(findings.messages(Severity::Warning).eq(["O3_0 not found"]));
    }

    #[rstest]
    fn test_check_demand_feasibility(valid_data: ModelData) {
        let findings = run(check_demand_feasibility, &valid_data);
        assert!(findings.messages(Severity::Info).eq([
            "Total demand: 1000",
            "Range: [400, 600]",
            "Average: 500.0"
        ]));
    }

    #[rstest]
    fn test_check_demand_feasibility_negative(mut valid_data: ModelData) {
        valid_data.demand.insert("o3".into(), Patients(-50.0));
        let findings = run(check_demand_feasibility, &valid_data);
        assert!(
            findings
                .messages(Severity::Warning)
                .eq(["Demand W has negative values: [o3]"])
        );
        assert_eq!(findings.count(Severity::Error), 0);
    }

    #[test]
    fn test_check_demand_feasibility_no_demand() {
        let findings = run(check_demand_feasibility, &ModelData::default());
        assert_eq!(findings, Findings::default());
    }

    #[rstest]
    fn test_check_facility_connectivity(mut valid_data: ModelData) {
        valid_data.distances[Level::L3] = DistanceCoverage::default();
        let findings = run(check_facility_connectivity, &valid_data);
        assert!(
            findings
                .messages(Severity::Info)
                .eq(["D0_1 coverage: 4/12", "D0_2 coverage: 4/12"])
        );
    }
}
