//! Schedule stress prediction
//!
//! Forecasts a 1-5 stress score for a day from its planned schedule blocks.
//! Independent of the behavioral pipeline: it reads only the declared plan,
//! never logged history.

use crate::normalizer::clamp01;
use crate::types::{BlockType, ScheduleBlock};

/// Duration assumed when a block omits one (minutes)
pub const DEFAULT_BLOCK_DURATION_MIN: u32 = 60;

/// Predicted 1-5 stress for the day, or `None` for an empty schedule.
///
/// Per block: `type_weight * duration_factor`. The aggregate is the plain
/// mean across blocks, clamped to 0-1 and rescaled via `round(c * 4 + 1)`.
pub fn predict_schedule_stress(blocks: &[ScheduleBlock]) -> Option<u8> {
    if blocks.is_empty() {
        return None;
    }

    let total: f64 = blocks
        .iter()
        .map(|block| {
            let minutes = block.duration_minutes.unwrap_or(DEFAULT_BLOCK_DURATION_MIN);
            type_weight(block.block_type) * duration_factor(minutes)
        })
        .sum();

    let clamped = clamp01(total / blocks.len() as f64);
    Some((clamped * 4.0 + 1.0).round() as u8)
}

/// Fixed stress weight per block category
fn type_weight(block_type: BlockType) -> f64 {
    match block_type {
        BlockType::Exam => 1.0,
        BlockType::Assignment => 0.75,
        BlockType::Lecture => 0.35,
        BlockType::Lab => 0.55,
        BlockType::Study => 0.50,
        BlockType::Meeting => 0.30,
        BlockType::Social => 0.05,
        BlockType::Break => -0.20,
        BlockType::Exercise => -0.25,
        BlockType::Other => 0.25,
    }
}

/// Step function of block length in minutes
fn duration_factor(minutes: u32) -> f64 {
    if minutes <= 30 {
        0.6
    } else if minutes <= 60 {
        0.8
    } else if minutes <= 90 {
        1.0
    } else if minutes <= 120 {
        1.2
    } else {
        1.4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use uuid::Uuid;

    fn block(block_type: BlockType, duration: Option<u32>) -> ScheduleBlock {
        ScheduleBlock {
            id: Uuid::new_v4(),
            title: "block".to_string(),
            block_type,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            duration_minutes: duration,
            course: None,
        }
    }

    #[test]
    fn test_empty_schedule_has_no_prediction() {
        assert_eq!(predict_schedule_stress(&[]), None);
    }

    #[test]
    fn test_four_ninety_minute_lectures() {
        // 0.35 * durationFactor(90)=1.0 per block, mean 0.35
        // round(0.35 * 4 + 1) = round(2.4) = 2
        let blocks: Vec<_> = (0..4).map(|_| block(BlockType::Lecture, Some(90))).collect();
        assert_eq!(predict_schedule_stress(&blocks), Some(2));
    }

    #[test]
    fn test_exam_day_maxes_out() {
        // Three long exams: 1.0 * 1.4 each, mean clamps to 1.0 -> 5
        let blocks: Vec<_> = (0..3).map(|_| block(BlockType::Exam, Some(180))).collect();
        assert_eq!(predict_schedule_stress(&blocks), Some(5));
    }

    #[test]
    fn test_recovery_blocks_pull_the_day_down() {
        // Break and exercise carry negative weight; mean clamps at zero -> 1
        let blocks = vec![
            block(BlockType::Break, Some(60)),
            block(BlockType::Exercise, Some(60)),
        ];
        assert_eq!(predict_schedule_stress(&blocks), Some(1));
    }

    #[test]
    fn test_missing_duration_defaults_to_an_hour() {
        // assignment 0.75 * durationFactor(60)=0.8 = 0.6 -> round(3.4) = 3
        let blocks = vec![block(BlockType::Assignment, None)];
        assert_eq!(predict_schedule_stress(&blocks), Some(3));
    }

    #[test]
    fn test_duration_steps() {
        assert_eq!(duration_factor(20), 0.6);
        assert_eq!(duration_factor(30), 0.6);
        assert_eq!(duration_factor(31), 0.8);
        assert_eq!(duration_factor(60), 0.8);
        assert_eq!(duration_factor(90), 1.0);
        assert_eq!(duration_factor(120), 1.2);
        assert_eq!(duration_factor(121), 1.4);
    }

    #[test]
    fn test_unrecognized_type_uses_other_weight() {
        // A mixed day parsed from planner JSON with an unknown category
        let json = r#"[
            {"id": "6f9619ff-8b86-d011-b42d-00cf4fc964ff", "title": "Office hours",
             "type": "office_hours", "start_time": "10:00:00", "duration": 30}
        ]"#;
        let blocks: Vec<ScheduleBlock> = serde_json::from_str(json).unwrap();
        assert_eq!(blocks[0].block_type, BlockType::Other);
        // 0.25 * 0.6 = 0.15 -> round(1.6) = 2
        assert_eq!(predict_schedule_stress(&blocks), Some(2));
    }
}
