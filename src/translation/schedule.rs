/*!
 * 49-day study schedule.
 *
 * Chunks are spread evenly over consecutive days; each day of the seven
 * weeks is paired with a combination of the seven lower sefirot (the week's
 * quality and the day's quality within it).
 */

use serde::{Deserialize, Serialize};

use crate::errors::ProcessingError;
use crate::manuscript::ChunkId;
use crate::numerals::to_hebrew_numeral;

/// Default length of the schedule in days
pub const STUDY_DAYS: usize = 49;

const SEFIROT: [&str; 7] = ["חסד", "גבורה", "תפארת", "נצח", "הוד", "יסוד", "מלכות"];

/// Study focus of one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayFocus {
    pub day: usize,
    pub hebrew_day: String,
    pub week: usize,
    pub day_of_week: usize,
    pub week_sefira: String,
    pub day_sefira: String,
    /// e.g. "גבורה שבחסד"
    pub combination: String,
}

/// Chunks assigned to one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyDay {
    pub day: usize,
    pub chunk_ids: Vec<ChunkId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySchedule {
    days: Vec<StudyDay>,
}

impl StudySchedule {
    /// Spread `chunk_ids` over `days` days in order. The first
    /// `len % days` days get one extra chunk.
    pub fn distribute(chunk_ids: &[ChunkId], days: usize) -> Result<Self, ProcessingError> {
        if days == 0 {
            return Err(ProcessingError::invalid_parameter("days", "must be at least 1"));
        }

        let per_day = chunk_ids.len() / days;
        let remainder = chunk_ids.len() % days;
        let mut remaining = chunk_ids;
        let mut schedule = Vec::with_capacity(days);

        for day in 1..=days {
            let take = per_day + usize::from(day <= remainder);
            let (today, rest) = remaining.split_at(take);
            schedule.push(StudyDay {
                day,
                chunk_ids: today.to_vec(),
            });
            remaining = rest;
        }

        Ok(Self { days: schedule })
    }

    pub fn days(&self) -> &[StudyDay] {
        &self.days
    }

    /// Chunks for a 1-based day
    pub fn chunks_for(&self, day: usize) -> Option<&[ChunkId]> {
        day.checked_sub(1)
            .and_then(|index| self.days.get(index))
            .map(|d| d.chunk_ids.as_slice())
    }

    /// Week, day-of-week and sefirot pair for a day in `1..=49`
    pub fn day_focus(day: usize) -> Result<DayFocus, ProcessingError> {
        if !(1..=STUDY_DAYS).contains(&day) {
            return Err(ProcessingError::invalid_parameter(
                "day",
                format!("{} is outside 1..={}", day, STUDY_DAYS),
            ));
        }

        let week = (day - 1) / 7 + 1;
        let day_of_week = (day - 1) % 7 + 1;
        let week_sefira = SEFIROT[week - 1];
        let day_sefira = SEFIROT[day_of_week - 1];

        Ok(DayFocus {
            day,
            hebrew_day: to_hebrew_numeral(day as i64)?,
            week,
            day_of_week,
            week_sefira: week_sefira.to_string(),
            day_sefira: day_sefira.to_string(),
            combination: format!("{} שב{}", day_sefira, week_sefira),
        })
    }
}
