//! Shared picker backbone.
//!
//! Both front ends drive the same three calls — resolve the current week,
//! load its games, run the matchup — so their behavior is identical given
//! the same selection and the same API responses.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};
use tracing::warn;

use crate::cfbd::{CalendarWeek, CfbdApi, Game};
use crate::error::{CfbdError, Result};
use crate::matchup;
use crate::output;
use crate::progress::Progress;

/// Resolved "current week" of the season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekInfo {
    pub year: u16,
    pub week: u8,
    pub season_type: String,
}

impl WeekInfo {
    fn fallback(year: u16) -> Self {
        Self {
            year,
            week: 1,
            season_type: "regular".to_string(),
        }
    }
}

/// The resolved week plus its scheduled games.
#[derive(Debug, Clone)]
pub struct WeekGames {
    pub week: WeekInfo,
    pub games: Vec<Game>,
}

/// Resolve which week of the season `now` falls in.
///
/// Picks the calendar entry whose first/last game window contains `now`;
/// before the season this is the first week, after it the last. A missing
/// or unreadable calendar degrades to week 1 of the regular season with a
/// warning — the games fetch that follows is the step that decides the run.
pub fn current_week(api: &dyn CfbdApi, now: DateTime<Utc>) -> WeekInfo {
    let year = now.year() as u16;
    match api.calendar(year) {
        Ok(calendar) => resolve_week(year, &calendar, now),
        Err(err) => {
            warn!(error = %err, "calendar unavailable, assuming week 1");
            WeekInfo::fallback(year)
        }
    }
}

fn resolve_week(year: u16, calendar: &[CalendarWeek], now: DateTime<Utc>) -> WeekInfo {
    let windows: Vec<(&CalendarWeek, DateTime<Utc>, DateTime<Utc>)> = calendar
        .iter()
        .filter_map(|week| {
            let start = parse_game_time(&week.first_game_start)?;
            let end = parse_game_time(&week.last_game_start)?;
            Some((week, start, end))
        })
        .collect();

    for (week, start, end) in &windows {
        if *start <= now && now <= *end {
            return info(year, week);
        }
    }
    // Not inside any window: before the season use the first week, after it
    // the last.
    if let Some((first, start, _)) = windows.first() {
        if now < *start {
            return info(year, first);
        }
    }
    match windows.last() {
        Some((last, _, _)) => info(year, last),
        None => WeekInfo::fallback(year),
    }
}

fn info(year: u16, week: &CalendarWeek) -> WeekInfo {
    WeekInfo {
        year,
        week: week.week,
        season_type: week.season_type.clone(),
    }
}

fn parse_game_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Fetch the current week's game list.
///
/// This is a required step: failures abort the run. `Unauthorized` passes
/// through intact so the surface can offer key re-entry; anything else is
/// reported as the failed games section.
pub fn load_week_games(api: &dyn CfbdApi, now: DateTime<Utc>) -> Result<WeekGames> {
    let week = current_week(api, now);
    let games = api
        .games(week.year, week.week, &week.season_type)
        .map_err(|err| match err {
            CfbdError::Unauthorized => CfbdError::Unauthorized,
            other => CfbdError::AggregationFailed {
                section: "current week games".to_string(),
                message: other.to_string(),
            },
        })?;
    Ok(WeekGames { week, games })
}

/// Aggregate the selected game and write the report. Returns the output
/// path. Nothing is written when aggregation fails.
pub fn run_matchup(
    api: &dyn CfbdApi,
    game: &Game,
    out_dir: &Path,
    progress: &mut dyn Progress,
) -> Result<PathBuf> {
    let report = matchup::aggregate(api, game, progress)?;
    let path = output::write_report(&report, out_dir)?;
    progress.log(&format!("Matchup data saved to {}", path.display()));
    Ok(path)
}
