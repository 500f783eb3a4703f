//! Blocking HTTP client for the CollegeFootballData API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::error::{CfbdError, Result};

use super::types::{CalendarWeek, Game, GameLines, RatingSystem, TeamTalent};
use super::CfbdApi;

/// Base URL for the CollegeFootballData API.
pub const CFBD_BASE_URL: &str = "https://api.collegefootballdata.com";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Thin wrapper over `reqwest::blocking` carrying the bearer credential.
///
/// Every operation is an independent, stateless GET. No retry policy: a
/// failed call surfaces immediately and the caller decides whether the
/// affected section was required.
pub struct CfbdClient {
    http: Client,
    base_url: String,
}

impl CfbdClient {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, CFBD_BASE_URL)
    }

    /// Client against a non-default base URL. Tests point this at a local
    /// mock server.
    pub fn with_base_url(config: &Config, base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let bearer = format!("Bearer {}", config.api_key);
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&bearer)?);

        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// GET an endpoint and decode its JSON body.
    ///
    /// 401/403 map to `Unauthorized`, other transport or status failures to
    /// `Network`, undecodable bodies to `MalformedResponse`.
    fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self.http.get(&url).query(params).send()?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(CfbdError::Unauthorized);
        }
        let body = response.error_for_status()?.text()?;

        serde_json::from_str(&body).map_err(|err| CfbdError::MalformedResponse {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        })
    }
}

impl CfbdApi for CfbdClient {
    fn calendar(&self, year: u16) -> Result<Vec<CalendarWeek>> {
        self.get("calendar", &[("year", year.to_string())])
    }

    fn games(&self, year: u16, week: u8, season_type: &str) -> Result<Vec<Game>> {
        self.get(
            "games",
            &[
                ("year", year.to_string()),
                ("week", week.to_string()),
                ("seasonType", season_type.to_string()),
                ("division", "fbs".to_string()),
            ],
        )
    }

    fn game_lines(&self, game_id: u64, year: u16) -> Result<Vec<GameLines>> {
        self.get(
            "lines",
            &[("gameId", game_id.to_string()), ("year", year.to_string())],
        )
    }

    fn team_lines(&self, team: &str, year: u16) -> Result<Vec<GameLines>> {
        self.get(
            "lines",
            &[("year", year.to_string()), ("team", team.to_string())],
        )
    }

    fn pregame_win_probability(
        &self,
        game_id: u64,
        year: u16,
        season_type: &str,
    ) -> Result<Value> {
        self.get(
            "metrics/wp/pregame",
            &[
                ("year", year.to_string()),
                ("seasonType", season_type.to_string()),
                ("gameId", game_id.to_string()),
            ],
        )
    }

    fn weather(&self, game_id: u64) -> Result<Value> {
        self.get("games/weather", &[("gameId", game_id.to_string())])
    }

    fn rating(&self, system: RatingSystem, team: &str, year: u16) -> Result<Value> {
        let endpoint = format!("ratings/{}", system.endpoint());
        self.get(
            &endpoint,
            &[("year", year.to_string()), ("team", team.to_string())],
        )
    }

    fn advanced_season_stats(&self, team: &str, year: u16) -> Result<Value> {
        self.get(
            "stats/season/advanced",
            &[
                ("year", year.to_string()),
                ("team", team.to_string()),
                ("excludeGarbageTime", "true".to_string()),
            ],
        )
    }

    fn team_records(&self, team: &str, year: u16) -> Result<Value> {
        self.get(
            "records",
            &[("year", year.to_string()), ("team", team.to_string())],
        )
    }

    fn talent(&self, year: u16) -> Result<Vec<TeamTalent>> {
        self.get("talent", &[("year", year.to_string())])
    }

    fn returning_production(&self, team: &str, year: u16) -> Result<Value> {
        self.get(
            "player/returning",
            &[("year", year.to_string()), ("team", team.to_string())],
        )
    }

    fn matchup_history(&self, team1: &str, team2: &str) -> Result<Value> {
        self.get(
            "teams/matchup",
            &[("team1", team1.to_string()), ("team2", team2.to_string())],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let client =
            CfbdClient::with_base_url(&Config::new("k"), "http://localhost:9/").unwrap();
        assert_eq!(client.base_url, "http://localhost:9");
    }

    #[test]
    fn keys_with_control_characters_are_rejected() {
        let result = CfbdClient::new(&Config::new("bad\nkey"));
        assert!(matches!(result, Err(CfbdError::InvalidHeader(_))));
    }
}
