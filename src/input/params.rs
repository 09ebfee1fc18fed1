//! Code for reading parameter tables (demand, capacities, step-down ratios and distances).
use super::parse_rows;
use crate::level::{Level, PerLevel};
use crate::model::{DistanceCoverage, ModelData};
use crate::units::{Dimensionless, Distance, Patients};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;
use strum::IntoEnumIterator;

/// Marks a missing entry in a parameter table
const MISSING_VALUE: &str = ".";

/// Demand weights, e.g. `param: I: W := o1 120 ... ;`
static DEMAND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bparam\s*:\s*I\s*:\s*W\b[^:;]*:=([^;]*);").expect("Invalid demand pattern")
});

/// A table of several parameters sharing an index, e.g. `param: O1_0 O1_2 := ... ;`.
///
/// The colon after `param` may be on a following line and an indexing set may precede the field
/// names (`param: L1: O1_0 O1_2 := ... ;`). Captures the field names and the body.
static TABLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bparam\s*:\s*(?:[\w\[\]]+\s*:)?([^:;]*?):=([^;]*);")
        .expect("Invalid table pattern")
});

/// Maximum distance per level, e.g. `param Dmax[K] := 1 30 ... ;`
static MAX_DISTANCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bparam\s+Dmax\s*\[\s*K\s*\]\s*:=([^;]*);").expect("Invalid Dmax pattern")
});

/// Capacity sections (`param C1 := ... ;`)
static CAPACITY_PATTERNS: LazyLock<PerLevel<Regex>> = LazyLock::new(|| {
    PerLevel::from_fn(|level| {
        Regex::new(&format!(
            r"\bparam\s+{}\b[^:;]*:=([^;]*);",
            level.capacity_param()
        ))
        .expect("Invalid capacity pattern")
    })
});

/// Origin distance sections (`param D0_1 := ... ;`), optionally with a column header
/// (`param D0_1 : j1 j2 := ... ;`)
static DISTANCE_PATTERNS: LazyLock<PerLevel<Regex>> = LazyLock::new(|| {
    PerLevel::from_fn(|level| {
        Regex::new(&format!(
            r"\bparam\s+{}\b[^:;]*(?::[^:;]*)?:=([^;]*);",
            level.distance_param()
        ))
        .expect("Invalid distance pattern")
    })
});

/// Read the origins and their demand weights (`I` and `W`).
pub(super) fn read_demand(content: &str, data: &mut ModelData) {
    let Some(caps) = DEMAND_PATTERN.captures(content) else {
        return;
    };

    for (id, weight) in parse_rows(caps.get(1).map_or("", |m| m.as_str()), 0) {
        data.demand.insert(id.into(), Patients(weight));
        data.origins.insert(id.into());
    }
}

/// Read the capacity of facilities at each level (`C1`, `C2`, `C3`).
pub(super) fn read_capacities(content: &str, data: &mut ModelData) {
    for level in Level::iter() {
        let Some(caps) = CAPACITY_PATTERNS[level].captures(content) else {
            continue;
        };

        data.capacities[level].extend(
            parse_rows(caps.get(1).map_or("", |m| m.as_str()), 0)
                .map(|(id, capacity)| (id.into(), Patients(capacity))),
        );
    }
}

/// Read the step-down ratios of each level (`O1_0`, `O2_0`, `O3_0`).
///
/// These are columns of a table which may hold other parameters too. The first table listing the
/// ratio among its fields is used, taking values from that field's column.
pub(super) fn read_step_down_ratios(content: &str, data: &mut ModelData) {
    for level in Level::iter() {
        let name = level.ratio_param();
        let table = TABLE_PATTERN.captures_iter(content).find_map(|caps| {
            let column = caps[1].split_whitespace().position(|field| field == name)?;
            Some((column, caps.get(2).map_or("", |m| m.as_str())))
        });

        let Some((column, body)) = table else {
            continue;
        };

        debug!("Found {name} in column {column} of parameter table");
        data.step_down_ratios[level].extend(
            parse_rows(body, column).map(|(id, ratio)| (id.into(), Dimensionless(ratio))),
        );
    }
}

/// Read the maximum travel distance of each level (`Dmax`).
///
/// Rows whose level is not an integer between 1 and 3 are skipped.
pub(super) fn read_max_distances(content: &str, data: &mut ModelData) {
    let Some(caps) = MAX_DISTANCE_PATTERN.captures(content) else {
        return;
    };

    for (level, distance) in parse_rows(caps.get(1).map_or("", |m| m.as_str()), 0) {
        if let Some(level) = level.parse().ok().and_then(Level::from_index) {
            data.max_distance.insert(level, Distance(distance));
        }
    }
}

/// Count the entries of the origin distance matrix of each level (`D0_1`, `D0_2`, `D0_3`).
///
/// An entry is any token of the section body, labels included. Only the missing value marker `.`
/// counts as unpopulated, so a complete matrix is fully covered whatever its layout. The distances
/// themselves are not kept.
pub(super) fn read_distances(content: &str, data: &mut ModelData) {
    for level in Level::iter() {
        let Some(caps) = DISTANCE_PATTERNS[level].captures(content) else {
            continue;
        };

        let body = caps.get(1).map_or("", |m| m.as_str());
        let entries = body.split_whitespace().count();
        let missing = body
            .split_whitespace()
            .filter(|token| *token == MISSING_VALUE)
            .count();
        data.distances[level] = DistanceCoverage {
            entries,
            populated: entries - missing,
        };
    }
}
