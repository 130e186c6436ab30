//! Core model of the finance lesson viewer: lesson pages and their sections,
//! the per-page navigation/completion/bookmark trackers, and reading progress
//! driven by the document scroll position. Nothing here depends on the GUI.

pub mod catalog;
pub mod config;
pub mod progress;
pub mod scroll;
pub mod section;
pub mod session;
pub mod tracker;
