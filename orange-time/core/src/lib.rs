//! Task collection state for Orange Time.
//!
//! This crate holds everything that does not touch the network or the file
//! system: the [`Task`] model, the date-ordered [`TaskStore`] and its mutation
//! API, the dashboard and timeline derivations, editor field rules, view
//! navigation, and the seed collection used when storage cannot be reached.

pub mod date;
pub mod editor;
pub mod model;
pub mod mutation;
pub mod navigation;
pub mod seed;
pub mod stats;
pub mod store;
pub mod timeline;

pub use date::{DateParseError, TaskDate};
pub use editor::{EditError, TaskEdit};
pub use model::{CATEGORIES, Category, CategoryDescriptor, Priority, Status, Task};
pub use mutation::{UNTITLED_TASK, UpsertOutcome};
pub use navigation::{Navigator, View};
pub use stats::{CategoryShare, DashboardSummary, StatusCounts};
pub use store::TaskStore;
pub use timeline::{CategoryFilter, GroupMode, TimelineGroup};
