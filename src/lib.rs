// src/lib.rs

//! Scheduling and quiz engine for a fixed 20-day hanja curriculum.
//!
//! The presentation layer talks to [`Session`]: it asks for today's
//! [`DayPlan`], shows the learning deck, runs a [`QuizRun`] and reports
//! completions back. Everything is synchronous and in-process.

pub mod calendar;
pub mod catalog;
pub mod constants;
pub mod curriculum;
pub mod database;
pub mod error;
pub mod models;
pub mod narration;
pub mod planner;
pub mod quiz;
pub mod repository;
pub mod session;

pub use catalog::Catalog;
pub use error::{CatalogError, CurriculumError, SessionError, StoreError};
pub use models::{DayPlan, Item, Level, Question, StudyKind, UserProgress};
pub use planner::{learning_deck, DayPlanner};
pub use quiz::{AnswerOutcome, QuizRun};
pub use session::{Session, TodayView};
