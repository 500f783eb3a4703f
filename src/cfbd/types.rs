//! Wire models for the CollegeFootballData API.
//!
//! Only fields the aggregation step consumes are typed; loosely shaped
//! payloads (weather, rating bodies, season stats, records, ...) ride along
//! as raw `serde_json::Value`. The API mixes key casings per endpoint: the
//! games endpoint serves snake_case while calendar and lines serve
//! camelCase, and a few numeric fields have historically been served as
//! strings.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accept a number, a numeric string, or null.
fn de_opt_f64_flexible<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Deserialize::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    })
}

fn default_season_type() -> String {
    "regular".to_string()
}

/// A scheduled game, as returned by the games endpoint. Immutable once
/// fetched; embedded verbatim in the output document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: u64,
    pub season: u16,
    #[serde(default)]
    pub week: u8,
    #[serde(default = "default_season_type")]
    pub season_type: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    pub home_team: String,
    #[serde(default)]
    pub home_conference: Option<String>,
    #[serde(default)]
    pub home_points: Option<f64>,
    pub away_team: String,
    #[serde(default)]
    pub away_conference: Option<String>,
    #[serde(default)]
    pub away_points: Option<f64>,
}

impl Game {
    /// Display label used by both pickers: `away @ home`.
    pub fn label(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }
}

/// One entry of the season calendar.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarWeek {
    #[serde(default)]
    pub week: u8,
    #[serde(rename = "seasonType", default = "default_season_type")]
    pub season_type: String,
    #[serde(rename = "firstGameStart")]
    pub first_game_start: String,
    #[serde(rename = "lastGameStart")]
    pub last_game_start: String,
}

/// Betting lines for one game: the game's identity plus zero or more
/// per-provider quotes. The historical variant is the same shape keyed by
/// team + season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLines {
    pub id: u64,
    #[serde(default)]
    pub season: Option<u16>,
    #[serde(default)]
    pub week: Option<u8>,
    #[serde(rename = "seasonType", default)]
    pub season_type: Option<String>,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "homeTeam")]
    pub home_team: String,
    #[serde(rename = "homeScore", default)]
    pub home_score: Option<f64>,
    #[serde(rename = "awayTeam")]
    pub away_team: String,
    #[serde(rename = "awayScore", default)]
    pub away_score: Option<f64>,
    #[serde(default)]
    pub lines: Vec<BettingLine>,
}

/// A single provider's quote for a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BettingLine {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64_flexible")]
    pub spread: Option<f64>,
    #[serde(
        rename = "spreadOpen",
        default,
        deserialize_with = "de_opt_f64_flexible"
    )]
    pub spread_open: Option<f64>,
    #[serde(rename = "formattedSpread", default)]
    pub formatted_spread: Option<String>,
    #[serde(
        rename = "overUnder",
        default,
        deserialize_with = "de_opt_f64_flexible"
    )]
    pub over_under: Option<f64>,
    #[serde(
        rename = "overUnderOpen",
        default,
        deserialize_with = "de_opt_f64_flexible"
    )]
    pub over_under_open: Option<f64>,
    #[serde(
        rename = "homeMoneyline",
        default,
        deserialize_with = "de_opt_f64_flexible"
    )]
    pub home_moneyline: Option<f64>,
    #[serde(
        rename = "awayMoneyline",
        default,
        deserialize_with = "de_opt_f64_flexible"
    )]
    pub away_moneyline: Option<f64>,
}

/// The four rating systems the API publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingSystem {
    SpPlus,
    Fpi,
    Elo,
    Srs,
}

impl RatingSystem {
    pub const ALL: [RatingSystem; 4] = [Self::SpPlus, Self::Fpi, Self::Elo, Self::Srs];

    /// Path segment under `/ratings/`, also the section key in the output
    /// document.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::SpPlus => "sp",
            Self::Fpi => "fpi",
            Self::Elo => "elo",
            Self::Srs => "srs",
        }
    }

    /// Human-facing name for progress messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::SpPlus => "SP+",
            Self::Fpi => "FPI",
            Self::Elo => "ELO",
            Self::Srs => "SRS",
        }
    }
}

impl fmt::Display for RatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the talent composite rankings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamTalent {
    #[serde(default)]
    pub year: Option<u16>,
    pub school: String,
    #[serde(default, deserialize_with = "de_opt_f64_flexible")]
    pub talent: Option<f64>,
}
