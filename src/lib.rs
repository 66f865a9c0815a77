//! Black Market: a terminal marketplace for trading company reward points.
//!
//! The core is UI-independent: [`store::MainStore`] answers deal queries
//! through the filter state, [`state::SessionGuard`] and
//! [`state::LoginAttempts`] guard the session, and [`deferred`] schedules
//! simulated backend latency. [`app::App`], [`handlers`] and [`ui`] drive
//! it from a ratatui terminal.

pub mod app;
pub mod clock;
pub mod deferred;
pub mod handlers;
pub mod logging;
pub mod mock_data;
pub mod model;
pub mod prefs;
pub mod query;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;
