// src/constants.rs

use crate::models::CurriculumEntry;

// --- Curriculum ---
pub const FIRST_DAY: u32 = 1;
pub const LAST_DAY: u32 = 20;
pub const FINAL_REINFORCEMENT_DAY: u32 = 18; // From here on the filler pool is the whole level
pub const REVIEW_LAG_DAYS: [u32; 3] = [2, 4, 7];

const fn day(day: u32, new: usize, review: usize) -> CurriculumEntry {
    CurriculumEntry {
        day,
        new,
        review,
        extra: 0,
    }
}

/// Standard 20-day plan. Review targets follow the lag pattern, e.g. day 8
/// reviews what was introduced on days 6, 4 and 1.
pub const STUDY_SCHEDULE: [CurriculumEntry; 20] = [
    day(1, 5, 0),
    day(2, 4, 0),
    day(3, 4, 5),
    day(4, 4, 4),
    day(5, 3, 9),
    day(6, 3, 8),
    day(7, 3, 7),
    day(8, 3, 12),
    day(9, 3, 10),
    day(10, 3, 10),
    day(11, 3, 10),
    day(12, 3, 9),
    day(13, 3, 9),
    day(14, 3, 9),
    day(15, 3, 9),
    day(16, 0, 20), // reinforcement
    day(17, 0, 20),
    day(18, 0, 30),
    day(19, 0, 30),
    day(20, 0, 30),
];

// --- Catalog ---
pub const ITEMS_PER_LEVEL: usize = 50;

// --- Weak Items ---
pub const WEAK_ITEMS_MAX: usize = 10;

// --- Quiz ---
pub const CHOICE_COUNT: usize = 4;
pub const DISTRACTOR_COUNT: usize = CHOICE_COUNT - 1;
pub const QUIZ_LIVES: u32 = 3;
pub const BLANK_MARKER: &str = "(  )";

// --- Narration ---
pub const NARRATION_REPEAT: u32 = 3;
pub const NARRATION_PAUSE_MS: u64 = 300;

// --- Persistence ---
pub const STORAGE_KEY: &str = "hanja_maro_v4";

// --- Settings Defaults ---
pub const DEFAULT_DAILY_COUNT: u32 = 5;
pub const DEFAULT_USER_NAME: &str = "학생";
