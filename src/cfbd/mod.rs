//! CollegeFootballData API surface: wire models, the blocking HTTP client,
//! and the trait seam the aggregator talks through.

mod client;
pub mod types;

use serde_json::Value;

use crate::error::Result;

pub use client::{CfbdClient, CFBD_BASE_URL};
pub use types::{BettingLine, CalendarWeek, Game, GameLines, RatingSystem, TeamTalent};

/// Read-only API operations the picker and aggregator depend on.
///
/// Every operation is stateless and independent; none depends on another's
/// result except through the parameters the caller supplies. Implemented by
/// [`CfbdClient`] for the real service and by in-memory doubles in tests.
pub trait CfbdApi {
    /// Season calendar: the week windows for `year`.
    fn calendar(&self, year: u16) -> Result<Vec<CalendarWeek>>;

    /// Scheduled FBS games for one week.
    fn games(&self, year: u16, week: u8, season_type: &str) -> Result<Vec<Game>>;

    /// Betting lines for one game.
    fn game_lines(&self, game_id: u64, year: u16) -> Result<Vec<GameLines>>;

    /// A team's betting lines across a season.
    fn team_lines(&self, team: &str, year: u16) -> Result<Vec<GameLines>>;

    /// Pregame win probabilities; the response may cover several games.
    fn pregame_win_probability(&self, game_id: u64, year: u16, season_type: &str)
        -> Result<Value>;

    /// Weather conditions for one game.
    fn weather(&self, game_id: u64) -> Result<Value>;

    /// A team's rating under one of the published rating systems.
    fn rating(&self, system: RatingSystem, team: &str, year: u16) -> Result<Value>;

    /// Advanced season statistics for a team, garbage time excluded.
    fn advanced_season_stats(&self, team: &str, year: u16) -> Result<Value>;

    /// A team's season records.
    fn team_records(&self, team: &str, year: u16) -> Result<Value>;

    /// Talent composite rankings for every team in `year`.
    fn talent(&self, year: u16) -> Result<Vec<TeamTalent>>;

    /// A team's returning production metrics.
    fn returning_production(&self, team: &str, year: u16) -> Result<Value>;

    /// Head-to-head history between two teams.
    fn matchup_history(&self, team1: &str, team2: &str) -> Result<Value>;
}
