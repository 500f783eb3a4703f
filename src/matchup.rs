//! Matchup aggregation: drive the API across every matchup-relevant
//! endpoint and merge the results into one report.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::cfbd::{CfbdApi, Game, GameLines, RatingSystem, TeamTalent};
use crate::error::{CfbdError, Result};
use crate::progress::Progress;

/// Fetch steps one aggregation run performs, used to size progress
/// reporting: current lines, two line histories, win probability, weather,
/// talent, head-to-head history, plus seven per-team fetches (four rating
/// systems, season stats, records, returning production).
pub const FETCH_STEPS: usize = 7 + 2 * 7;

/// The assembled output document: everything the API knows about one
/// matchup, keyed under `game`, `lines`, `home` and `away` sections.
///
/// Built in a single pass per run and written once. Optional sections that
/// could not be fetched are `None`/empty rather than absent.
#[derive(Debug, Serialize)]
pub struct MatchupReport {
    /// The selected game, embedded verbatim.
    pub game: Game,
    pub weather: Option<Value>,
    pub win_probability: Option<Value>,
    pub lines: LinesSection,
    pub matchup_history: Option<Value>,
    pub home: TeamSection,
    pub away: TeamSection,
}

#[derive(Debug, Serialize)]
pub struct LinesSection {
    /// Lines quoted for the selected game itself.
    pub current: Option<GameLines>,
    /// Season line history for each side, exact-name matched.
    pub home_history: Vec<GameLines>,
    pub away_history: Vec<GameLines>,
}

#[derive(Debug, Serialize)]
pub struct TeamSection {
    pub team: String,
    pub season_stats: Option<Value>,
    pub ratings: RatingsSection,
    pub record: Option<Value>,
    pub returning_production: Option<Value>,
    pub talent: Option<TeamTalent>,
}

#[derive(Debug, Default, Serialize)]
pub struct RatingsSection {
    pub sp: Option<Value>,
    pub fpi: Option<Value>,
    pub elo: Option<Value>,
    pub srs: Option<Value>,
}

impl RatingsSection {
    fn set(&mut self, system: RatingSystem, value: Option<Value>) {
        match system {
            RatingSystem::SpPlus => self.sp = value,
            RatingSystem::Fpi => self.fpi = value,
            RatingSystem::Elo => self.elo = value,
            RatingSystem::Srs => self.srs = value,
        }
    }

    pub fn get(&self, system: RatingSystem) -> Option<&Value> {
        match system {
            RatingSystem::SpPlus => self.sp.as_ref(),
            RatingSystem::Fpi => self.fpi.as_ref(),
            RatingSystem::Elo => self.elo.as_ref(),
            RatingSystem::Srs => self.srs.as_ref(),
        }
    }
}

/// Gather every data set for `game` and merge them into a [`MatchupReport`].
///
/// The selected game's identity is the only required input: a game without
/// an id or team names fails with `AggregationFailed` before anything is
/// fetched. Every fetch below that is optional — a failure is logged,
/// surfaced through `progress`, and leaves the affected section empty.
pub fn aggregate(
    api: &dyn CfbdApi,
    game: &Game,
    progress: &mut dyn Progress,
) -> Result<MatchupReport> {
    if game.id == 0 || game.home_team.is_empty() || game.away_team.is_empty() {
        return Err(CfbdError::AggregationFailed {
            section: "game info".to_string(),
            message: "selected game is missing its id or team names".to_string(),
        });
    }

    let year = game.season;
    let home = game.home_team.clone();
    let away = game.away_team.clone();

    progress.begin(FETCH_STEPS);
    progress.log(&format!("Gathering matchup data for {}...", game.label()));

    let mut fetch = Fetch {
        progress: &mut *progress,
    };

    fetch.say("Retrieving betting lines...");
    let current = fetch
        .optional("betting lines", api.game_lines(game.id, year))
        .and_then(|all| lines_for_game(all, game.id));
    let home_history = fetch
        .optional(
            &format!("betting history for {home}"),
            api.team_lines(&home, year),
        )
        .map(|all| lines_for_team(all, &home))
        .unwrap_or_default();
    let away_history = fetch
        .optional(
            &format!("betting history for {away}"),
            api.team_lines(&away, year),
        )
        .map(|all| lines_for_team(all, &away))
        .unwrap_or_default();

    fetch.say("Retrieving win probability and weather...");
    let win_probability = fetch
        .optional(
            "pregame win probability",
            api.pregame_win_probability(game.id, year, &game.season_type),
        )
        .and_then(|value| win_prob_for_game(value, game.id));
    let weather = fetch
        .optional("weather", api.weather(game.id))
        .and_then(first_item);

    let mut home_section = team_section(api, &mut fetch, &home, year);
    let mut away_section = team_section(api, &mut fetch, &away, year);

    fetch.say("Retrieving talent rankings...");
    let talent = fetch
        .optional("talent rankings", api.talent(year))
        .unwrap_or_default();
    home_section.talent = talent_for_team(&talent, &home);
    away_section.talent = talent_for_team(&talent, &away);

    fetch.say("Retrieving head-to-head history...");
    let matchup_history = fetch
        .optional("head-to-head history", api.matchup_history(&home, &away))
        .filter(|value| !value.is_null());

    progress.finish();

    Ok(MatchupReport {
        game: game.clone(),
        weather,
        win_probability,
        lines: LinesSection {
            current,
            home_history,
            away_history,
        },
        matchup_history,
        home: home_section,
        away: away_section,
    })
}

fn team_section(api: &dyn CfbdApi, fetch: &mut Fetch<'_>, team: &str, year: u16) -> TeamSection {
    fetch.say(&format!("Retrieving ratings for {team}..."));
    let mut ratings = RatingsSection::default();
    for system in RatingSystem::ALL {
        let value = fetch
            .optional(
                &format!("{system} rating for {team}"),
                api.rating(system, team, year),
            )
            .and_then(first_item);
        ratings.set(system, value);
    }

    fetch.say(&format!("Retrieving season stats and records for {team}..."));
    let season_stats = fetch
        .optional(
            &format!("season stats for {team}"),
            api.advanced_season_stats(team, year),
        )
        .and_then(first_item);
    let record = fetch
        .optional(&format!("records for {team}"), api.team_records(team, year))
        .and_then(first_item);
    let returning_production = fetch
        .optional(
            &format!("returning production for {team}"),
            api.returning_production(team, year),
        )
        .and_then(first_item);

    TeamSection {
        team: team.to_string(),
        season_stats,
        ratings,
        record,
        returning_production,
        talent: None,
    }
}

struct Fetch<'a> {
    progress: &'a mut dyn Progress,
}

impl Fetch<'_> {
    fn say(&mut self, msg: &str) {
        self.progress.log(msg);
    }

    /// Tolerance path for optional sections: a failure degrades to `None`
    /// with a logged and surfaced warning. Each call counts as one step
    /// whether it succeeded or not.
    fn optional<T>(&mut self, section: &str, result: Result<T>) -> Option<T> {
        let out = match result {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(section, error = %err, "skipping optional section");
                self.progress.warn(&format!("{section} unavailable: {err}"));
                None
            }
        };
        self.progress.item_done();
        out
    }
}

/// First element of a JSON array, the value itself otherwise; `None` for
/// null or an empty array. Most single-team endpoints answer with a
/// one-element list.
fn first_item(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    }
}

/// The entry for this exact game id; the endpoint may return neighbors.
fn lines_for_game(all: Vec<GameLines>, game_id: u64) -> Option<GameLines> {
    all.into_iter().find(|lines| lines.id == game_id)
}

/// Season line history rows whose stored team name equals `team`, sorted by
/// week.
///
/// Matching is case-sensitive string equality. An abbreviation or alias for
/// the same school does not match and its rows are dropped; a known
/// limitation, not corrected here.
fn lines_for_team(all: Vec<GameLines>, team: &str) -> Vec<GameLines> {
    let mut rows: Vec<GameLines> = all
        .into_iter()
        .filter(|lines| lines.home_team == team || lines.away_team == team)
        .collect();
    rows.sort_by_key(|lines| lines.week.unwrap_or(0));
    rows
}

/// Talent row for `team`, matched by exact school name (same limitation as
/// [`lines_for_team`]).
fn talent_for_team(rows: &[TeamTalent], team: &str) -> Option<TeamTalent> {
    rows.iter().find(|row| row.school == team).cloned()
}

/// The win-probability entry for this game id, if the response carries one.
fn win_prob_for_game(value: Value, game_id: u64) -> Option<Value> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .find(|item| item.get("gameId").and_then(Value::as_u64) == Some(game_id)),
        Value::Null => None,
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfbd::test_support::StubApi;
    use serde_json::json;

    #[derive(Default)]
    struct Recording {
        total: usize,
        done: usize,
        logs: Vec<String>,
        warnings: Vec<String>,
        finished: bool,
    }

    impl Progress for Recording {
        fn begin(&mut self, total: usize) {
            self.total = total;
        }
        fn log(&mut self, msg: &str) {
            self.logs.push(msg.to_string());
        }
        fn warn(&mut self, msg: &str) {
            self.warnings.push(msg.to_string());
        }
        fn item_done(&mut self) {
            self.done += 1;
        }
        fn finish(&mut self) {
            self.finished = true;
        }
    }

    fn sample_game() -> Game {
        serde_json::from_value(json!({
            "id": 42u64,
            "season": 2024,
            "week": 10,
            "season_type": "regular",
            "venue": "Michigan Stadium",
            "home_team": "Michigan",
            "away_team": "Ohio State"
        }))
        .unwrap()
    }

    fn game_lines(id: u64, home: &str, away: &str, week: u8) -> GameLines {
        serde_json::from_value(json!({
            "id": id,
            "week": week,
            "homeTeam": home,
            "awayTeam": away,
            "lines": [{"provider": "consensus", "spread": -3.5}]
        }))
        .unwrap()
    }

    #[test]
    fn every_section_degrades_when_the_api_is_down() {
        let api = StubApi::default();
        let mut progress = Recording::default();

        let report = aggregate(&api, &sample_game(), &mut progress).unwrap();

        assert!(report.weather.is_none());
        assert!(report.win_probability.is_none());
        assert!(report.lines.current.is_none());
        assert!(report.lines.home_history.is_empty());
        assert!(report.lines.away_history.is_empty());
        assert!(report.matchup_history.is_none());
        for section in [&report.home, &report.away] {
            assert!(section.season_stats.is_none());
            assert!(section.talent.is_none());
            for system in RatingSystem::ALL {
                assert!(section.ratings.get(system).is_none());
            }
        }

        // One surfaced warning per skipped fetch; run still completed.
        assert_eq!(progress.warnings.len(), FETCH_STEPS);
        assert_eq!(progress.done, FETCH_STEPS);
        assert_eq!(progress.total, FETCH_STEPS);
        assert!(progress.finished);
    }

    #[test]
    fn game_without_identity_fails_before_fetching() {
        let api = StubApi::default();
        let mut game = sample_game();
        game.home_team = String::new();
        let mut progress = Recording::default();

        let result = aggregate(&api, &game, &mut progress);

        assert!(matches!(
            result,
            Err(CfbdError::AggregationFailed { .. })
        ));
        assert_eq!(progress.done, 0);
    }

    #[test]
    fn report_game_section_matches_the_selection() {
        let api = StubApi::default();
        let game = sample_game();

        let report = aggregate(&api, &game, &mut Recording::default()).unwrap();

        assert_eq!(report.game.id, game.id);
        assert_eq!(report.game.home_team, game.home_team);
        assert_eq!(report.game.away_team, game.away_team);
        assert_eq!(report.game.venue, game.venue);
        assert_eq!(report.home.team, "Michigan");
        assert_eq!(report.away.team, "Ohio State");
    }

    #[test]
    fn history_and_talent_match_by_exact_name_only() {
        let api = StubApi {
            team_lines: Some(vec![
                game_lines(1, "Michigan", "Minnesota", 9),
                game_lines(2, "MICH", "Minnesota", 3),
                game_lines(3, "Purdue", "Michigan", 5),
                game_lines(4, "Ohio St.", "Purdue", 4),
            ]),
            talent: Some(vec![
                serde_json::from_value(json!({"school": "Michigan", "talent": 978.4})).unwrap(),
                serde_json::from_value(json!({"school": "Ohio St.", "talent": 990.1})).unwrap(),
            ]),
            ..StubApi::default()
        };

        let report = aggregate(&api, &sample_game(), &mut Recording::default()).unwrap();

        // "MICH" and "Ohio St." are the same schools in the source data but
        // do not match the selected game's names.
        let ids: Vec<u64> = report.lines.home_history.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 1], "exact matches only, sorted by week");
        assert!(report.lines.away_history.is_empty());
        assert_eq!(report.home.talent.as_ref().unwrap().talent, Some(978.4));
        assert!(report.away.talent.is_none());
    }

    #[test]
    fn current_lines_filter_to_the_selected_game() {
        let api = StubApi {
            game_lines: Some(vec![
                game_lines(41, "Michigan", "Ohio State", 10),
                game_lines(42, "Michigan", "Ohio State", 10),
            ]),
            ..StubApi::default()
        };

        let report = aggregate(&api, &sample_game(), &mut Recording::default()).unwrap();

        assert_eq!(report.lines.current.as_ref().unwrap().id, 42);
    }

    #[test]
    fn win_probability_matches_by_game_id() {
        let api = StubApi {
            win_probability: Some(json!([
                {"gameId": 7, "homeWinProb": 0.9},
                {"gameId": 42, "homeWinProb": 0.42}
            ])),
            ..StubApi::default()
        };

        let report = aggregate(&api, &sample_game(), &mut Recording::default()).unwrap();

        assert_eq!(report.win_probability.unwrap()["homeWinProb"], json!(0.42));
    }

    #[test]
    fn single_team_payloads_collapse_to_their_first_entry() {
        let api = StubApi {
            season_stats: Some(json!([{"team": "either", "offense": {}}])),
            weather: Some(json!([{"gameId": 42, "temperature": 3.9}])),
            ..StubApi::default()
        };

        let report = aggregate(&api, &sample_game(), &mut Recording::default()).unwrap();

        assert_eq!(report.weather.unwrap()["temperature"], json!(3.9));
        assert!(report.home.season_stats.is_some());
    }

    #[test]
    fn first_item_shapes() {
        assert!(first_item(Value::Null).is_none());
        assert!(first_item(json!([])).is_none());
        assert_eq!(first_item(json!([1, 2])), Some(json!(1)));
        assert_eq!(first_item(json!({"a": 1})), Some(json!({"a": 1})));
    }
}
