// src/session.rs

use crate::calendar;
use crate::catalog::Catalog;
use crate::constants::*;
use crate::curriculum::Curriculum;
use crate::database;
use crate::error::{SessionError, StoreError};
use crate::models::{DayPlan, DayStatus, Level, Settings, StudyKind, UserProgress};
use crate::planner::DayPlanner;
use crate::quiz::{self, AnswerOutcome, QuestionPool, QuizRun};
use crate::repository;
use chrono::NaiveDate;
use log::{debug, info, warn};
use rand::Rng;
use rusqlite::Connection;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodayView {
    /// Weekend: nothing is planned or advanced.
    Rest,
    /// Curriculum exhausted for the selected level.
    Finished,
    Study(DayPlan),
}

/// Owns the store connection and the in-memory progress. Every mutation is
/// applied in memory first and then written back as a whole record.
pub struct Session {
    conn: Connection,
    catalog: Catalog,
    progress: UserProgress,
}

impl Session {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        info!("Database path: {:?}", path.as_ref());
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, SessionError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    pub fn with_connection(conn: Connection) -> Result<Self, SessionError> {
        database::init_db(&conn)?;
        let catalog = Catalog::embedded()?;
        Curriculum::new(&STUDY_SCHEDULE, ITEMS_PER_LEVEL)?;
        let progress = repository::load_progress(&conn)?;
        info!(
            "Session ready: level {}, day {}",
            progress.selected_level,
            progress.current().current_day
        );
        Ok(Session {
            conn,
            catalog,
            progress,
        })
    }

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected_level(&self) -> Level {
        self.progress.selected_level
    }

    pub fn current_day(&self) -> u32 {
        self.progress.current().current_day
    }

    fn planner(&self) -> DayPlanner<'_> {
        DayPlanner::new(&self.catalog, Curriculum::standard())
    }

    // --- Planning ---

    /// Plan for the selected level's current day, ignoring the calendar.
    pub fn plan_today<R: Rng + ?Sized>(&self, rng: &mut R) -> DayPlan {
        let level = self.selected_level();
        let lp = self.progress.current();
        self.planner()
            .plan(level, lp.current_day, &lp.weak_item_ids, rng)
    }

    pub fn today<R: Rng + ?Sized>(&self, date: NaiveDate, rng: &mut R) -> TodayView {
        if !calendar::is_study_day(date) {
            debug!("{} is not a study day.", date);
            return TodayView::Rest;
        }
        let plan = self.plan_today(rng);
        if plan.entry.is_none() {
            return TodayView::Finished;
        }
        TodayView::Study(plan)
    }

    pub fn start_quiz<R: Rng + ?Sized>(&self, plan: &DayPlan, rng: &mut R) -> QuizRun {
        let pools = QuestionPool::from_plan(plan);
        let questions = quiz::generate(&pools, self.catalog.all(), rng);
        info!("Quiz started for day {}: {} questions", plan.day, questions.len());
        QuizRun::new(questions)
    }

    /// Feeds one answer into `run`; misses become weak items and a finished run
    /// marks today's quiz as done.
    pub fn answer(
        &mut self,
        run: &mut QuizRun,
        choice: &str,
        date: NaiveDate,
    ) -> Result<Option<AnswerOutcome>, StoreError> {
        let Some(outcome) = run.answer(choice) else {
            return Ok(None);
        };
        if let Some(item_id) = outcome.missed_item() {
            self.record_mistake(item_id)?;
        }
        if outcome.is_finished() {
            self.complete_study_on(StudyKind::Quiz, date)?;
        }
        Ok(Some(outcome))
    }

    // --- Progress Mutations ---

    pub fn complete_study(&mut self, kind: StudyKind) -> Result<bool, StoreError> {
        self.complete_study_on(kind, calendar::today())
    }

    /// Returns true when the selected level moved to its next day.
    pub fn complete_study_on(
        &mut self,
        kind: StudyKind,
        date: NaiveDate,
    ) -> Result<bool, StoreError> {
        if !calendar::is_study_day(date) {
            warn!("Ignoring {:?} completion on non-study day {}", kind, date);
            return Ok(false);
        }
        let level = self.selected_level();
        let lp = self.progress.current_mut();
        let old_day = lp.current_day;
        let advanced = lp.complete_study(kind, date);
        if advanced {
            info!("{}: day {} complete, advancing to day {}", level, old_day, lp.current_day);
        } else {
            debug!("{}: {:?} recorded for day {}", level, kind, old_day);
        }
        self.save()?;
        Ok(advanced)
    }

    pub fn record_mistake(&mut self, item_id: u32) -> Result<(), StoreError> {
        self.progress.current_mut().record_mistake(item_id);
        debug!(
            "Weak items for {}: {:?}",
            self.selected_level(),
            self.progress.current().weak_item_ids
        );
        self.save()
    }

    pub fn reset_level(&mut self, level: Level) -> Result<(), StoreError> {
        *self.progress.levels.get_mut(level) = Default::default();
        info!("Progress for {} reset", level);
        self.save()
    }

    /// Wipes every level, the settings and the level selection.
    pub fn reset_all(&mut self) -> Result<(), StoreError> {
        repository::clear_progress(&self.conn)?;
        self.progress = UserProgress::default();
        info!("All progress reset");
        Ok(())
    }

    pub fn select_level(&mut self, level: Level) -> Result<(), StoreError> {
        self.progress.selected_level = level;
        info!("Selected level {}", level);
        self.save()
    }

    pub fn update_settings(&mut self, settings: Settings) -> Result<(), StoreError> {
        self.progress.settings = settings;
        self.save()
    }

    // --- Views ---

    pub fn curriculum_overview(&self) -> Vec<(u32, DayStatus)> {
        let lp = self.progress.current();
        (FIRST_DAY..=LAST_DAY)
            .map(|day| {
                let status = match lp.record_for(day) {
                    Some(r) if r.is_complete() => DayStatus::Completed,
                    Some(r) => DayStatus::InProgress {
                        learned: r.learned,
                        quiz_done: r.quiz_done,
                    },
                    None if day == lp.current_day => DayStatus::Current,
                    None => DayStatus::Upcoming,
                };
                (day, status)
            })
            .collect()
    }

    fn save(&self) -> Result<(), StoreError> {
        repository::save_progress(&self.conn, &self.progress)
    }
}
