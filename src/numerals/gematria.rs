/*!
 * Gematria aggregates over arbitrary text.
 */

use serde::{Deserialize, Serialize};

use super::tables::NumeralWeightTable;

/// The four aggregates computed for every chunk.
///
/// A struct rather than a map so every record carries exactly the same
/// scheme names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GematriaValues {
    /// Sum of absolute weights
    pub standard: u64,
    /// Sum of digit-reduced weights
    pub small: u64,
    /// Sum of spelled-out weights
    pub full: u64,
    /// Number of recognized letters
    pub ordinal: u64,
}

impl std::ops::Add for GematriaValues {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            standard: self.standard + other.standard,
            small: self.small + other.small,
            full: self.full + other.full,
            ordinal: self.ordinal + other.ordinal,
        }
    }
}

/// Calculator reading weights from the shared table
#[derive(Debug, Clone, Copy)]
pub struct GematriaCalculator {
    table: &'static NumeralWeightTable,
}

impl GematriaCalculator {
    /// Create a calculator backed by the shared table
    pub fn new() -> Self {
        Self {
            table: NumeralWeightTable::shared(),
        }
    }

    /// Compute all four aggregates in a single pass
    pub fn calculate(&self, text: &str) -> GematriaValues {
        text.chars().fold(GematriaValues::default(), |mut acc, c| {
            if let Some(weight) = self.table.standard(c) {
                acc.standard += u64::from(weight);
                acc.ordinal += 1;
            }
            if let Some(small) = self.table.small(c) {
                acc.small += u64::from(small);
            }
            if let Some(full) = self.table.full(c) {
                acc.full += u64::from(full);
            }
            acc
        })
    }

    /// Standard value only, as used for key-term weights and batch hints
    pub fn standard(&self, text: &str) -> u64 {
        text.chars()
            .filter_map(|c| self.table.standard(c))
            .map(u64::from)
            .sum()
    }
}

impl Default for GematriaCalculator {
    fn default() -> Self {
        Self::new()
    }
}
