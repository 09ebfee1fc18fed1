//! Code for reading the facility sets of each level.
use crate::level::{Level, PerLevel};
use crate::model::ModelData;
use regex::Regex;
use std::sync::LazyLock;
use strum::IntoEnumIterator;

/// Patterns for the set sections of a level
struct SetPatterns {
    /// All facilities (`set L[k] := ... ;`)
    all: Regex,
    /// Existing facilities (`set EL[k] := ... ;`)
    existing: Regex,
}

static SET_PATTERNS: LazyLock<PerLevel<SetPatterns>> = LazyLock::new(|| {
    PerLevel::from_fn(|level| SetPatterns {
        all: set_pattern("L", level),
        existing: set_pattern("EL", level),
    })
});

/// Build the pattern for a set section with the given name, capturing its body
fn set_pattern(name: &str, level: Level) -> Regex {
    Regex::new(&format!(
        r"\bset\s+{name}\s*\[\s*{}\s*\]\s*:=([^;]*);",
        level.index()
    ))
    .expect("Invalid set pattern")
}

/// Read `L[k]` and `EL[k]` for every level.
pub(super) fn read_sets(content: &str, data: &mut ModelData) {
    for level in Level::iter() {
        let patterns = &SET_PATTERNS[level];
        let facilities = &mut data.facilities[level];

        if let Some(caps) = patterns.all.captures(content) {
            facilities
                .all
                .extend(caps[1].split_whitespace().map(Into::into));
        }

        if let Some(caps) = patterns.existing.captures(content) {
            facilities
                .existing
                .extend(caps[1].split_whitespace().map(Into::into));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::FacilityID;
    use itertools::Itertools;

    fn ids(data: &ModelData, level: Level) -> Vec<&str> {
        data.facilities[level]
            .all
            .iter()
            .map(|id: &FacilityID| &*id.0)
            .collect_vec()
    }

    #[test]
    fn test_read_sets() {
        let content = "set L[1] := H1 H2\n  H3 ;\nset EL[1] := H1 ;\nset L[2]:=S1 S2;\n";
        let mut data = ModelData::default();
        read_sets(content, &mut data);

        assert_eq!(ids(&data, Level::L1), ["H1", "H2", "H3"]);
        assert_eq!(data.facilities[Level::L1].existing.len(), 1);
        assert_eq!(ids(&data, Level::L2), ["S1", "S2"]);
        assert!(data.facilities[Level::L3].all.is_empty());
    }

    #[test]
    fn test_read_sets_existing_not_confused_with_all() {
        let content = "set EL[3] := X1 ;";
        let mut data = ModelData::default();
        read_sets(content, &mut data);

        assert!(data.facilities[Level::L3].all.is_empty());
        assert_eq!(data.facilities[Level::L3].existing.len(), 1);
    }

    #[test]
    fn test_read_sets_dedupes() {
        let mut data = ModelData::default();
        read_sets("set L[2] := A B A ;", &mut data);
        read_sets("set L[2] := B C ;", &mut data);
        assert_eq!(ids(&data, Level::L2), ["A", "B", "C"]);
    }
}
