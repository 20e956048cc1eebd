// src/models.rs

use crate::constants::*;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// --- Levels ---

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    #[serde(rename = "8급")]
    Grade8,
    #[serde(rename = "7급A")]
    Grade7A,
    #[serde(rename = "7급B")]
    Grade7B,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Grade8, Level::Grade7A, Level::Grade7B];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Grade8 => "8급",
            Level::Grade7A => "7급A",
            Level::Grade7B => "7급B",
        }
    }

    /// Position of this level's contiguous slice in the catalog.
    pub fn index(&self) -> usize {
        match self {
            Level::Grade8 => 0,
            Level::Grade7A => 1,
            Level::Grade7B => 2,
        }
    }
}

impl FromStr for Level {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "8급" => Ok(Level::Grade8),
            "7급A" => Ok(Level::Grade7A),
            "7급B" => Ok(Level::Grade7B),
            other => Err(format!("unknown level: {}", other)),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Catalog Models ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: u32,
    pub character: String,
    pub meaning: String,
    pub sound: String,
    pub word1: String,
    pub word1_meaning: String,
    pub word2: String,
    pub word2_meaning: String,
}

impl Item {
    /// "meaning sound", the way the glyph is read aloud and asked in quizzes.
    pub fn reading(&self) -> String {
        format!("{} {}", self.meaning, self.sound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurriculumEntry {
    pub day: u32,
    pub new: usize,
    pub review: usize,
    pub extra: usize,
}

// --- Progress Models ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyKind {
    Learn,
    Quiz,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub study_day: u32,
    pub learned: bool,
    pub quiz_done: bool,
}

impl DailyRecord {
    pub fn is_complete(&self) -> bool {
        self.learned && self.quiz_done
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    #[serde(rename = "dailyQuests")]
    pub daily_records: Vec<DailyRecord>,
    #[serde(rename = "currentStudyDay")]
    pub current_day: u32,
    #[serde(rename = "weakHanjaIds")]
    pub weak_item_ids: Vec<u32>,
}

impl Default for LevelProgress {
    fn default() -> Self {
        LevelProgress {
            daily_records: Vec::new(),
            current_day: FIRST_DAY,
            weak_item_ids: Vec::new(),
        }
    }
}

impl LevelProgress {
    pub fn record_for(&self, day: u32) -> Option<&DailyRecord> {
        self.daily_records.iter().find(|r| r.study_day == day)
    }

    /// Marks one half of the current day as done. Returns true when this call
    /// moved `current_day` forward.
    pub fn complete_study(&mut self, kind: StudyKind, today: NaiveDate) -> bool {
        let day = self.current_day;
        let record = match self.daily_records.iter().position(|r| r.study_day == day) {
            Some(idx) => &mut self.daily_records[idx],
            None => {
                self.daily_records.push(DailyRecord {
                    date: today,
                    study_day: day,
                    learned: false,
                    quiz_done: false,
                });
                let last = self.daily_records.len() - 1;
                &mut self.daily_records[last]
            }
        };

        match kind {
            StudyKind::Learn => record.learned = true,
            StudyKind::Quiz => record.quiz_done = true,
        }

        if record.is_complete() {
            let next = day.saturating_add(1).min(LAST_DAY);
            self.current_day = next;
            return next != day;
        }
        false
    }

    /// Most recent miss goes first; the list stays unique and capped.
    pub fn record_mistake(&mut self, item_id: u32) {
        self.weak_item_ids.retain(|&id| id != item_id);
        self.weak_item_ids.insert(0, item_id);
        self.weak_item_ids.truncate(WEAK_ITEMS_MAX);
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelTable {
    #[serde(rename = "8급")]
    pub grade8: LevelProgress,
    #[serde(rename = "7급A")]
    pub grade7a: LevelProgress,
    #[serde(rename = "7급B")]
    pub grade7b: LevelProgress,
}

impl LevelTable {
    pub fn iter(&self) -> impl Iterator<Item = (Level, &LevelProgress)> {
        Level::ALL.into_iter().map(move |level| (level, self.get(level)))
    }

    pub fn get(&self, level: Level) -> &LevelProgress {
        match level {
            Level::Grade8 => &self.grade8,
            Level::Grade7A => &self.grade7a,
            Level::Grade7B => &self.grade7b,
        }
    }

    pub fn get_mut(&mut self, level: Level) -> &mut LevelProgress {
        match level {
            Level::Grade8 => &mut self.grade8,
            Level::Grade7A => &mut self.grade7a,
            Level::Grade7B => &mut self.grade7b,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub daily_count: u32,
    pub study_days: Vec<Weekday>,
    pub user_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            daily_count: DEFAULT_DAILY_COUNT,
            study_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            user_name: DEFAULT_USER_NAME.to_string(),
        }
    }
}

/// The whole persisted record: every level, the settings and the active level.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub levels: LevelTable,
    pub settings: Settings,
    pub selected_level: Level,
}

impl Default for UserProgress {
    fn default() -> Self {
        UserProgress {
            levels: LevelTable::default(),
            settings: Settings::default(),
            selected_level: Level::Grade8,
        }
    }
}

impl UserProgress {
    pub fn current(&self) -> &LevelProgress {
        self.levels.get(self.selected_level)
    }

    pub fn current_mut(&mut self) -> &mut LevelProgress {
        self.levels.get_mut(self.selected_level)
    }
}

// --- Plan / View Models ---

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayPlan {
    pub day: u32,
    pub entry: Option<CurriculumEntry>,
    pub new_items: Vec<Item>,
    pub review_items: Vec<Item>,
    pub extra_mix: Vec<Item>,
}

impl DayPlan {
    pub fn is_empty(&self) -> bool {
        self.new_items.is_empty() && self.review_items.is_empty() && self.extra_mix.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTag {
    New,
    Review,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyCard {
    pub item: Item,
    pub tag: CardTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Completed,
    InProgress { learned: bool, quiz_done: bool },
    Current,
    Upcoming,
}

// --- Quiz Models ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// glyph -> "meaning sound"
    Basic,
    /// "meaning sound" -> glyph
    Reverse,
    /// example word -> the glyph it contains
    WordToGlyph,
    /// both example words with the glyph blanked -> glyph
    CommonGlyph,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::Basic,
        QuestionKind::Reverse,
        QuestionKind::WordToGlyph,
        QuestionKind::CommonGlyph,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionSource {
    New,
    Review,
    Extra,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub kind: QuestionKind,
    pub source: QuestionSource,
    pub item_id: u32,
    pub prompt: String,
    pub instruction: String,
    pub correct: String,
    pub choices: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 12).unwrap()
    }

    #[test]
    fn learn_then_quiz_advances_exactly_one_day() {
        let mut lp = LevelProgress::default();
        assert!(!lp.complete_study(StudyKind::Learn, monday()));
        assert_eq!(lp.current_day, 1);
        assert!(lp.complete_study(StudyKind::Quiz, monday()));
        assert_eq!(lp.current_day, 2);
        assert_eq!(lp.daily_records.len(), 1);
        assert!(lp.record_for(1).unwrap().is_complete());
    }

    #[test]
    fn repeating_one_half_does_not_advance() {
        let mut lp = LevelProgress::default();
        lp.complete_study(StudyKind::Quiz, monday());
        lp.complete_study(StudyKind::Quiz, monday());
        assert_eq!(lp.current_day, 1);
        let rec = lp.record_for(1).unwrap();
        assert!(rec.quiz_done);
        assert!(!rec.learned);
    }

    #[test]
    fn last_day_is_clamped() {
        let mut lp = LevelProgress {
            current_day: LAST_DAY,
            ..Default::default()
        };
        lp.complete_study(StudyKind::Learn, monday());
        assert!(!lp.complete_study(StudyKind::Quiz, monday()));
        assert_eq!(lp.current_day, LAST_DAY);
    }

    #[test]
    fn completing_a_day_beyond_range_does_not_overflow() {
        let mut lp = LevelProgress {
            current_day: u32::MAX,
            ..Default::default()
        };
        lp.complete_study(StudyKind::Learn, monday());
        assert!(lp.complete_study(StudyKind::Quiz, monday()));
        assert_eq!(lp.current_day, LAST_DAY);
    }

    #[test]
    fn weak_list_is_unique_recent_first_and_capped() {
        let mut lp = LevelProgress::default();
        for id in 1..=15 {
            lp.record_mistake(id);
        }
        lp.record_mistake(12);
        assert_eq!(lp.weak_item_ids.len(), WEAK_ITEMS_MAX);
        assert_eq!(lp.weak_item_ids[0], 12);
        assert_eq!(lp.weak_item_ids[1], 15);
        assert!(!lp.weak_item_ids.contains(&5));

        let mut seen = lp.weak_item_ids.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), lp.weak_item_ids.len());
    }

    #[test]
    fn level_names_round_trip_through_from_str() {
        for level in Level::ALL {
            assert_eq!(level.as_str().parse::<Level>(), Ok(level));
        }
        assert!("6급".parse::<Level>().is_err());
    }

    #[test]
    fn persisted_shape_uses_camel_case_storage_names() {
        let mut progress = UserProgress::default();
        progress.current_mut().record_mistake(7);
        progress.current_mut().complete_study(StudyKind::Learn, monday());

        let value = serde_json::to_value(&progress).unwrap();
        let lv = &value["levels"]["8급"];
        assert_eq!(lv["currentStudyDay"], 1);
        assert_eq!(lv["weakHanjaIds"][0], 7);
        assert_eq!(lv["dailyQuests"][0]["date"], "2026-10-12");
        assert_eq!(lv["dailyQuests"][0]["studyDay"], 1);
        assert_eq!(lv["dailyQuests"][0]["quizDone"], false);
        assert_eq!(value["settings"]["userName"], "학생");
        assert_eq!(value["settings"]["studyDays"][0], "Mon");
        assert_eq!(value["selectedLevel"], "8급");
    }
}
