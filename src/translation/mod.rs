/*!
 * Preparing chunks for translation.
 *
 * - `batch`: fixed-capacity translation batches with their instruction
 * - `schedule`: the 49-day study plan over the chunk sequence
 */

pub use self::batch::{Batch, BatchItem, BatchScheduler, DEFAULT_BATCH_SIZE, DEFAULT_INSTRUCTION};
pub use self::schedule::{DayFocus, StudyDay, StudySchedule, STUDY_DAYS};

pub mod batch;
pub mod schedule;
