/*!
 * Rendering integers as Hebrew letter numerals.
 */

use crate::errors::ProcessingError;

use super::tables::NumeralWeightTable;

/// Render `value` in Hebrew letters.
///
/// Zero has no letter form and is rejected. 15 and 16 are written טו and טז,
/// hundreds above 400 repeat ת, and thousands are rendered recursively
/// followed by a geresh-style `'`.
pub fn to_hebrew_numeral(value: i64) -> Result<String, ProcessingError> {
    if value == 0 {
        return Err(ProcessingError::invalid_parameter(
            "value",
            "zero has no Hebrew numeral form",
        ));
    }

    let mut out = String::new();
    if value < 0 {
        out.push('-');
    }
    render_positive(value.unsigned_abs(), &mut out);
    Ok(out)
}

fn render_positive(mut value: u64, out: &mut String) {
    let table = NumeralWeightTable::shared();

    let thousands = value / 1000;
    if thousands > 0 {
        render_positive(thousands, out);
        out.push('\'');
        value %= 1000;
    }

    let mut hundreds = (value / 100) * 100;
    while hundreds >= 400 {
        out.push('ת');
        hundreds -= 400;
    }
    if let Some(letter) = letter(table, hundreds) {
        out.push(letter);
    }
    value %= 100;

    match value {
        15 => out.push_str("טו"),
        16 => out.push_str("טז"),
        _ => {
            if let Some(letter) = letter(table, (value / 10) * 10) {
                out.push(letter);
            }
            if let Some(letter) = letter(table, value % 10) {
                out.push(letter);
            }
        }
    }
}

fn letter(table: &NumeralWeightTable, value: u64) -> Option<char> {
    if value == 0 {
        return None;
    }
    u32::try_from(value).ok().and_then(|v| table.letter_for(v))
}
