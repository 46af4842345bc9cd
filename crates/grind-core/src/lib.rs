//! Core analytics engine for the submission dashboard.
//!
//! This crate is a pure, stateless pipeline from a raw submission log to
//! the derived views a dashboard renders:
//! - Solved-set normalization: first-accepted dedup over the raw log
//! - Per-tag success statistics and day-level activity aggregation
//! - Current/longest streak detection with an explicit "today"
//! - Month calendar and year heatmap grid construction
//!
//! Nothing here reads a clock, performs I/O, or retains state between
//! calls: every entry point is a deterministic function of its inputs
//! plus an explicit reference date, so identical inputs always produce
//! byte-identical outputs.

pub mod calendar;
pub mod daily;
pub mod dashboard;
pub mod heatmap;
pub mod solved;
pub mod streak;
pub mod submission;
pub mod tags;
pub mod types;

pub use calendar::{CalendarCell, MONTH_GRID_CELLS, MonthGrid, build_month_grid};
pub use daily::{ActivityDay, Level, aggregate_by_day};
pub use dashboard::Dashboard;
pub use heatmap::{HeatmapCell, MonthBoundary, YearHeatmap, YearStats, build_year_grid};
pub use solved::{DifficultyBuckets, FirstSolve, SolvedProblems, solved_problems};
pub use streak::{StreakState, compute_streak};
pub use submission::{Submission, UnknownVerdict, Verdict};
pub use tags::{TagStat, analyze_tags};
pub use types::{Handle, PeriodError, ProblemKey, ValidationError};
