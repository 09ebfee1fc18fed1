//! The sets and parameters of a facility location model, as extracted from its data files.
use crate::id::{FacilityID, OriginID};
use crate::level::{Level, PerLevel};
use crate::units::{Dimensionless, Distance, Patients};
use indexmap::{IndexMap, IndexSet};
use itertools::{Itertools, MinMaxResult};

/// Demand weight for each origin
pub type DemandMap = IndexMap<OriginID, Patients>;

/// Capacity of each facility at a given level
pub type CapacityMap = IndexMap<FacilityID, Patients>;

/// Step-down ratio for each facility at a given level
pub type StepDownMap = IndexMap<FacilityID, Dimensionless>;

/// Maximum travel distance for each level
pub type MaxDistanceMap = IndexMap<Level, Distance>;

/// The facilities defined for a level
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacilitySet {
    /// All facilities (existing and candidate) at this level
    pub all: IndexSet<FacilityID>,
    /// The facilities which are already open
    pub existing: IndexSet<FacilityID>,
}

impl FacilitySet {
    /// Number of facilities which are candidates for opening (i.e. not already open)
    pub fn candidate_count(&self) -> usize {
        self.all.difference(&self.existing).count()
    }
}

/// How many entries a distance matrix section contained
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistanceCoverage {
    /// The number of whitespace-delimited entries in the section body
    pub entries: usize,
    /// The number of those entries which are not the missing value marker (`.`)
    pub populated: usize,
}

impl DistanceCoverage {
    /// Whether the section was missing or empty
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }
}

/// All the data needed to validate a model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelData {
    /// Demand origins (`I`)
    pub origins: IndexSet<OriginID>,
    /// Demand weights (`W`)
    pub demand: DemandMap,
    /// Facility sets (`L[k]` and `EL[k]`)
    pub facilities: PerLevel<FacilitySet>,
    /// Facility capacities (`C1`, `C2`, `C3`)
    pub capacities: PerLevel<CapacityMap>,
    /// Proportion of patients leaving the cascade at each level (`O1_0`, `O2_0`, `O3_0`)
    pub step_down_ratios: PerLevel<StepDownMap>,
    /// Maximum travel distance (`Dmax`)
    pub max_distance: MaxDistanceMap,
    /// Coverage of the origin distance matrices (`D0_1`, `D0_2`, `D0_3`)
    pub distances: PerLevel<DistanceCoverage>,
}

/// Summary statistics for a table of values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Sum of values
    pub total: f64,
    /// Arithmetic mean
    pub mean: f64,
}

impl Stats {
    /// Calculate statistics for some values, returning `None` if there are none
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect_vec();
        let (min, max) = match values.iter().copied().minmax_by(f64::total_cmp) {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(x) => (x, x),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        let total: f64 = values.iter().sum();

        Some(Self {
            min,
            max,
            total,
            mean: total / values.len() as f64,
        })
    }
}

impl ModelData {
    /// Statistics for the demand weights
    pub fn demand_stats(&self) -> Option<Stats> {
        Stats::from_values(self.demand.values().map(|w| w.value()))
    }

    /// Statistics for the capacities at a level
    pub fn capacity_stats(&self, level: Level) -> Option<Stats> {
        Stats::from_values(self.capacities[level].values().map(|c| c.value()))
    }

    /// Statistics for the step-down ratios at a level
    pub fn step_down_stats(&self, level: Level) -> Option<Stats> {
        Stats::from_values(self.step_down_ratios[level].values().map(|r| r.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_stats_empty() {
        assert!(Stats::from_values(std::iter::empty()).is_none());
    }

    #[test]
    fn test_stats() {
        let stats = Stats::from_values([3.0, 1.0, 2.0]).unwrap();
        assert_approx_eq!(f64, stats.min, 1.0);
        assert_approx_eq!(f64, stats.max, 3.0);
        assert_approx_eq!(f64, stats.total, 6.0);
        assert_approx_eq!(f64, stats.mean, 2.0);

        let stats = Stats::from_values([5.0]).unwrap();
        assert_eq!((stats.min, stats.max), (5.0, 5.0));
    }

    #[test]
    fn test_candidate_count() {
        let set = FacilitySet {
            all: ["H1".into(), "H2".into(), "H3".into()].into_iter().collect(),
            existing: ["H1".into()].into_iter().collect(),
        };
        assert_eq!(set.candidate_count(), 2);
        assert_eq!(FacilitySet::default().candidate_count(), 0);
    }

    #[test]
    fn test_capacity_stats() {
        let mut data = ModelData::default();
        assert!(data.capacity_stats(Level::L2).is_none());
        data.capacities[Level::L2].insert("H1".into(), Patients(400.0));
        data.capacities[Level::L2].insert("H2".into(), Patients(600.0));
        let stats = data.capacity_stats(Level::L2).unwrap();
        assert_approx_eq!(f64, stats.total, 1000.0);
        assert_approx_eq!(f64, stats.mean, 500.0);
    }
}
