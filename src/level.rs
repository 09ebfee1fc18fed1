//! Levels of the care cascade (e.g. acute, step-down and long-term care).
use std::fmt;
use strum::EnumIter;

/// A tier in the three-stage facility cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum Level {
    /// Level 1, where all demand enters the cascade
    L1,
    /// Level 2
    L2,
    /// Level 3
    L3,
}

impl Level {
    /// The 1-based index of the level, as used in the data files (e.g. `L[2]`)
    pub fn index(self) -> u8 {
        match self {
            Self::L1 => 1,
            Self::L2 => 2,
            Self::L3 => 3,
        }
    }

    /// Get the level for a 1-based index, if there is one
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            1 => Some(Self::L1),
            2 => Some(Self::L2),
            3 => Some(Self::L3),
            _ => None,
        }
    }

    /// Position of this level in per-level arrays
    pub(crate) fn slot(self) -> usize {
        usize::from(self.index() - 1)
    }

    /// Name of the capacity parameter for this level (e.g. `C2`)
    pub fn capacity_param(self) -> String {
        format!("C{}", self.index())
    }

    /// Name of the step-down ratio parameter for this level (e.g. `O2_0`)
    pub fn ratio_param(self) -> String {
        format!("O{}_0", self.index())
    }

    /// Name of the origin distance parameter for this level (e.g. `D0_2`)
    pub fn distance_param(self) -> String {
        format!("D0_{}", self.index())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.index())
    }
}

/// A value held separately for each [`Level`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerLevel<T>([T; 3]);

impl<T> PerLevel<T> {
    /// Create from a function giving the value for each level
    pub fn from_fn<F: FnMut(Level) -> T>(mut f: F) -> Self {
        Self([f(Level::L1), f(Level::L2), f(Level::L3)])
    }

    /// Get the value for a level
    pub fn get(&self, level: Level) -> &T {
        &self.0[level.slot()]
    }

    /// Get a mutable reference to the value for a level
    pub fn get_mut(&mut self, level: Level) -> &mut T {
        &mut self.0[level.slot()]
    }
}

impl<T> std::ops::Index<Level> for PerLevel<T> {
    type Output = T;

    fn index(&self, level: Level) -> &T {
        self.get(level)
    }
}

impl<T> std::ops::IndexMut<Level> for PerLevel<T> {
    fn index_mut(&mut self, level: Level) -> &mut T {
        self.get_mut(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[test]
    fn test_level_iter() {
        assert_eq!(
            Level::iter().map(Level::index).collect_vec(),
            [1, 2, 3]
        );
    }

    #[rstest]
    #[case(1, Some(Level::L1))]
    #[case(3, Some(Level::L3))]
    #[case(0, None)]
    #[case(4, None)]
    fn test_from_index(#[case] index: i64, #[case] expected: Option<Level>) {
        assert_eq!(Level::from_index(index), expected);
    }

    #[test]
    fn test_param_names() {
        assert_eq!(Level::L2.capacity_param(), "C2");
        assert_eq!(Level::L3.ratio_param(), "O3_0");
        assert_eq!(Level::L1.distance_param(), "D0_1");
        assert_eq!(Level::L2.to_string(), "L2");
    }

    #[test]
    fn test_per_level() {
        let indices = PerLevel::from_fn(Level::index);
        assert_eq!(indices[Level::L3], 3);

        let mut values = PerLevel::<u32>::default();
        values[Level::L2] = 5;
        *values.get_mut(Level::L3) += 1;
        assert_eq!(values.get(Level::L1), &0);
        assert_eq!(values[Level::L2], 5);
        assert_eq!(values[Level::L3], 1);
    }
}
