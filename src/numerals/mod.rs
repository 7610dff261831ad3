/*!
 * Hebrew numeral weights.
 *
 * - `tables`: the shared, versioned letter weight table
 * - `gematria`: aggregate calculator over arbitrary text
 * - `hebrew`: rendering integers as letter numerals
 */

pub mod gematria;
pub mod hebrew;
pub mod tables;

pub use gematria::{GematriaCalculator, GematriaValues};
pub use hebrew::to_hebrew_numeral;
pub use tables::{NumeralWeightTable, WeightScheme};
