//! College Football Matchup Picker Library
//!
//! Backbone shared by the GUI and CLI front ends of a data-gathering client
//! for the CollegeFootballData API: list the current week's games, let the
//! user pick one, gather every matchup-relevant data set the API offers
//! (betting lines, ratings, season stats, weather, win probability, talent,
//! records, returning production, head-to-head history), and write the
//! merged result to a single JSON document.
//!
//! ## Behavior
//!
//! - **Sequential blocking I/O**: one HTTP call at a time, no retries.
//! - **Required vs optional data**: the game list and the chosen game's
//!   identity abort the run on failure; every other fetch degrades to an
//!   empty section with a surfaced warning.
//! - **One document per run**: `matchup_data_<away>_<home>.json`, a pure
//!   function of the two team names, overwritten on rerun.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use cfb_picker::{CfbdClient, Config, NullProgress, session};
//!
//! # fn example() -> cfb_picker::Result<()> {
//! let client = CfbdClient::new(&Config::new("my-api-key"))?;
//! let week = session::load_week_games(&client, chrono::Utc::now())?;
//! if let Some(game) = week.games.first() {
//!     let path = session::run_matchup(&client, game, Path::new("."), &mut NullProgress)?;
//!     println!("wrote {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Set the API key once to skip the interactive prompt:
//! ```bash
//! export CFBD_API_KEY=...
//! ```

pub mod cfbd;
pub mod config;
pub mod error;
#[cfg(feature = "gui")]
pub mod gui;
pub mod matchup;
pub mod output;
pub mod progress;
pub mod session;

// Re-export commonly used types
pub use cfbd::{CfbdApi, CfbdClient, Game, RatingSystem};
pub use config::Config;
pub use error::{CfbdError, Result};
pub use matchup::MatchupReport;
pub use progress::{NullProgress, Progress};

/// Environment variable consulted before the config file for the API key.
pub const API_KEY_ENV_VAR: &str = "CFBD_API_KEY";
