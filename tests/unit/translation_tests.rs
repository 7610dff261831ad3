/*!
 * Tests for batch scheduling and the study schedule
 */

use ezchajim::manuscript::ChunkId;
use ezchajim::translation::{BatchScheduler, StudySchedule, STUDY_DAYS};

use crate::common;

#[test]
fn test_schedule_with23Chunks_shouldProduceTenTenThree() {
    let chunks = common::numbered_chunks(23);
    assert_eq!(chunks.len(), 23);

    let batches = BatchScheduler::new(10).unwrap().schedule(&chunks);
    let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![10, 10, 3]);
    assert_eq!(batches[2].batch_id(), "BATCH_003");
}

#[test]
fn test_schedule_shouldCoverEveryChunkOnceInOrder() {
    let chunks = common::numbered_chunks(17);
    for capacity in 1..=20 {
        let batches = BatchScheduler::new(capacity).unwrap().schedule(&chunks);
        assert_eq!(batches.len(), chunks.len().div_ceil(capacity));

        let ids: Vec<ChunkId> = batches.iter().flat_map(|b| b.chunk_ids().to_vec()).collect();
        let expected: Vec<ChunkId> = chunks.iter().map(|c| c.id()).collect();
        assert_eq!(ids, expected, "capacity {}", capacity);

        for batch in &batches[..batches.len() - 1] {
            assert_eq!(batch.len(), capacity);
        }
    }
}

#[test]
fn test_schedule_payload_shouldMirrorChunkIds() {
    let chunks = common::numbered_chunks(4);
    for batch in BatchScheduler::new(3).unwrap().schedule(&chunks) {
        let item_ids: Vec<ChunkId> = batch.items().iter().map(|i| i.id).collect();
        assert_eq!(item_ids, batch.chunk_ids());
    }
}

#[test]
fn test_distribute_withScheduleOfAllChunks_shouldSpreadEvenly() {
    let chunks = common::numbered_chunks(60);
    let ids: Vec<ChunkId> = chunks.iter().map(|c| c.id()).collect();
    let schedule = StudySchedule::distribute(&ids, STUDY_DAYS).unwrap();

    let sizes: Vec<usize> = schedule.days().iter().map(|d| d.chunk_ids.len()).collect();
    assert_eq!(sizes.iter().sum::<usize>(), 60);
    assert_eq!(sizes.iter().filter(|&&n| n == 2).count(), 11);
    assert!(sizes[..11].iter().all(|&n| n == 2));
    assert!(sizes[11..].iter().all(|&n| n == 1));
}

#[test]
fn test_dayFocus_shouldCycleSefirotWithinWeek() {
    let focus = StudySchedule::day_focus(15).unwrap();
    assert_eq!(focus.week, 3);
    assert_eq!(focus.day_of_week, 1);
    assert_eq!(focus.week_sefira, "תפארת");
    assert_eq!(focus.day_sefira, "חסד");
    assert_eq!(focus.hebrew_day, "טו");
}
