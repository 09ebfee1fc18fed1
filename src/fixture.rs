//! Fixtures for tests
use crate::level::{Level, PerLevel};
use crate::model::{DistanceCoverage, FacilitySet, ModelData};
use crate::units::{Dimensionless, Distance, Patients};
use indexmap::indexmap;
use rstest::fixture;

/// Build a facility set from the IDs of all facilities and of the existing ones
fn facility_set(all: &[&str], existing: &[&str]) -> FacilitySet {
    FacilitySet {
        all: all.iter().map(|&id| id.into()).collect(),
        existing: existing.iter().map(|&id| id.into()).collect(),
    }
}

/// Consistent data with two facilities per level, which passes every check
#[fixture]
pub fn valid_data() -> ModelData {
    ModelData {
        origins: ["o1".into(), "o2".into()].into_iter().collect(),
        demand: indexmap! {
            "o1".into() => Patients(400.0),
            "o2".into() => Patients(600.0),
        },
        facilities: PerLevel::from_fn(|level| match level {
            Level::L1 => facility_set(&["H1", "H2"], &["H1"]),
            Level::L2 => facility_set(&["S1", "S2"], &["S1"]),
            Level::L3 => facility_set(&["T1", "T2"], &["T1"]),
        }),
        capacities: PerLevel::from_fn(|level| match level {
            Level::L1 => indexmap! {"H1".into() => Patients(900.0), "H2".into() => Patients(600.0)},
            Level::L2 => {
                indexmap! {"S1".into() => Patients(1000.0), "S2".into() => Patients(1200.0)}
            }
            Level::L3 => indexmap! {"T1".into() => Patients(500.0), "T2".into() => Patients(700.0)},
        }),
        step_down_ratios: PerLevel::from_fn(|level| match level {
            Level::L1 => {
                indexmap! {"H1".into() => Dimensionless(0.3), "H2".into() => Dimensionless(0.4)}
            }
            Level::L2 => {
                indexmap! {"S1".into() => Dimensionless(0.6), "S2".into() => Dimensionless(0.7)}
            }
            Level::L3 => {
                indexmap! {"T1".into() => Dimensionless(0.8), "T2".into() => Dimensionless(0.8)}
            }
        }),
        max_distance: indexmap! {
            Level::L1 => Distance(30.0),
            Level::L2 => Distance(60.0),
            Level::L3 => Distance(120.0),
        },
        distances: PerLevel::from_fn(|_| DistanceCoverage {
            entries: 12,
            populated: 4,
        }),
    }
}
