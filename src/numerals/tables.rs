/*!
 * Shared numeral weight table for Hebrew letters.
 *
 * Every calculator in the crate reads letter weights from here, so a change
 * to a weight is a change of `NumeralWeightTable::VERSION`.
 */

use serde::{Deserialize, Serialize};

/// Named weight schemes carried by the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightScheme {
    /// Absolute value (mispar hechrechi)
    Standard,
    /// Digit-reduced value, always in 1..=9 (mispar katan)
    Small,
    /// Spelled-out letter name value (milui)
    Full,
}

impl WeightScheme {
    /// All schemes in their canonical order
    pub const ALL: [WeightScheme; 3] = [Self::Standard, Self::Small, Self::Full];

    /// Lowercase scheme name as used in exported documents
    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Small => "small",
            Self::Full => "full",
        }
    }
}

impl std::fmt::Display for WeightScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Letter → value pairs for the units, tens and hundreds, in ascending order.
/// Final forms are not listed; they share the value of their base letter.
const NUMERAL_LETTERS: [(u32, char); 22] = [
    (1, 'א'), (2, 'ב'), (3, 'ג'), (4, 'ד'), (5, 'ה'),
    (6, 'ו'), (7, 'ז'), (8, 'ח'), (9, 'ט'), (10, 'י'),
    (20, 'כ'), (30, 'ל'), (40, 'מ'), (50, 'נ'), (60, 'ס'),
    (70, 'ע'), (80, 'פ'), (90, 'צ'), (100, 'ק'), (200, 'ר'),
    (300, 'ש'), (400, 'ת'),
];

/// The shared, versioned numeral table
#[derive(Debug)]
pub struct NumeralWeightTable {
    _private: (),
}

static SHARED_TABLE: NumeralWeightTable = NumeralWeightTable { _private: () };

impl NumeralWeightTable {
    /// Version of the weight data
    pub const VERSION: &'static str = "1.0";

    /// The process-wide table instance
    pub fn shared() -> &'static NumeralWeightTable {
        &SHARED_TABLE
    }

    /// Weight of `c` under `scheme`, `None` when the character is not a
    /// recognized letter for that scheme
    pub fn weight(&self, scheme: WeightScheme, c: char) -> Option<u32> {
        match scheme {
            WeightScheme::Standard => self.standard(c),
            WeightScheme::Small => self.small(c),
            WeightScheme::Full => self.full(c),
        }
    }

    /// Absolute weight. Final forms carry the weight of their base letter.
    pub fn standard(&self, c: char) -> Option<u32> {
        let value = match c {
            'א' => 1,
            'ב' => 2,
            'ג' => 3,
            'ד' => 4,
            'ה' => 5,
            'ו' => 6,
            'ז' => 7,
            'ח' => 8,
            'ט' => 9,
            'י' => 10,
            'כ' | 'ך' => 20,
            'ל' => 30,
            'מ' | 'ם' => 40,
            'נ' | 'ן' => 50,
            'ס' => 60,
            'ע' => 70,
            'פ' | 'ף' => 80,
            'צ' | 'ץ' => 90,
            'ק' => 100,
            'ר' => 200,
            'ש' => 300,
            'ת' => 400,
            _ => return None,
        };
        Some(value)
    }

    /// Digit-reduced weight: `((standard - 1) mod 9) + 1`
    pub fn small(&self, c: char) -> Option<u32> {
        self.standard(c).map(|w| (w - 1) % 9 + 1)
    }

    /// Spelled-out weight. Only the 22 base letters have an entry.
    pub fn full(&self, c: char) -> Option<u32> {
        let value = match c {
            'א' => 111,
            'ב' => 412,
            'ג' => 83,
            'ד' => 434,
            'ה' => 6,
            'ו' => 13,
            'ז' => 67,
            'ח' => 418,
            'ט' => 419,
            'י' => 20,
            'כ' => 100,
            'ל' => 74,
            'מ' => 90,
            'נ' => 106,
            'ס' => 120,
            'ע' => 130,
            'פ' => 81,
            'צ' => 104,
            'ק' => 186,
            'ר' => 510,
            'ש' => 360,
            'ת' => 406,
            _ => return None,
        };
        Some(value)
    }

    /// Whether the character counts as a recognized letter
    pub fn is_recognized(&self, c: char) -> bool {
        self.standard(c).is_some()
    }

    /// Letter used to write `value` (1..=9, tens up to 90, hundreds up to 400)
    pub fn letter_for(&self, value: u32) -> Option<char> {
        NUMERAL_LETTERS
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, letter)| *letter)
    }
}
