// src/curriculum.rs

use crate::constants::{FIRST_DAY, STUDY_SCHEDULE};
use crate::error::CurriculumError;
use crate::models::CurriculumEntry;

/// Ordered day table. Days are contiguous starting at 1.
#[derive(Debug, Clone, Copy)]
pub struct Curriculum<'a> {
    entries: &'a [CurriculumEntry],
}

impl Default for Curriculum<'static> {
    fn default() -> Self {
        Curriculum::standard()
    }
}

impl Curriculum<'static> {
    pub fn standard() -> Self {
        Curriculum {
            entries: &STUDY_SCHEDULE,
        }
    }
}

impl<'a> Curriculum<'a> {
    /// Checks day contiguity and that the table never runs past the level's items.
    pub fn new(entries: &'a [CurriculumEntry], level_size: usize) -> Result<Self, CurriculumError> {
        if entries.is_empty() {
            return Err(CurriculumError::Empty);
        }
        for (i, entry) in entries.iter().enumerate() {
            let expected = FIRST_DAY + i as u32;
            if entry.day != expected {
                return Err(CurriculumError::DayGap {
                    expected,
                    found: entry.day,
                });
            }
        }
        let scheduled: usize = entries.iter().map(|e| e.new).sum();
        if scheduled > level_size {
            return Err(CurriculumError::TooManyNewItems {
                scheduled,
                available: level_size,
            });
        }
        Ok(Curriculum { entries })
    }

    pub fn entry(&self, day: u32) -> Option<&CurriculumEntry> {
        if day < FIRST_DAY {
            return None;
        }
        self.entries.get((day - FIRST_DAY) as usize)
    }

    pub fn last_day(&self) -> u32 {
        FIRST_DAY + self.entries.len() as u32 - 1
    }

    /// Number of items introduced on all days strictly before `day`.
    pub fn new_offset(&self, day: u32) -> usize {
        self.entries
            .iter()
            .take_while(|e| e.day < day)
            .map(|e| e.new)
            .sum()
    }

    /// Catalog-slice range of the items introduced on `day`.
    pub fn new_range(&self, day: u32) -> std::ops::Range<usize> {
        let start = self.new_offset(day);
        let count = self.entry(day).map(|e| e.new).unwrap_or(0);
        start..start + count
    }
}
