use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use loserpool_backend::db::InMemoryStore;
use loserpool_backend::league::mapping::{map_game, MappingError};
use loserpool_backend::state::AppState;

use loserpool_backend::models::week::SeasonWeek;
use loserpool_backend::providers::scrape::parse_schedule_page;
use loserpool_backend::providers::{
    EspnProvider, HttpFetcher, ProviderError, RetryPolicy, ScheduleProvider, SportsDataProvider,
};

mod common;
use common::utils::{init_tracing, week, TEST_PRESEASON_START};

fn fetcher(max_retries: u32) -> HttpFetcher {
    HttpFetcher::new(
        Duration::from_secs(5),
        RetryPolicy::new(max_retries, Duration::from_millis(1)),
    )
    .expect("Failed to build HTTP client")
}

fn espn_event(away: &str, home: &str, state: &str, away_score: &str, home_score: &str) -> serde_json::Value {
    json!({
        "date": "2025-09-07T17:00Z",
        "status": { "type": { "name": format!("STATUS_{}", state), "state": "post" } },
        "competitions": [{
            "competitors": [
                { "homeAway": "home", "team": { "abbreviation": home }, "score": home_score },
                { "homeAway": "away", "team": { "abbreviation": away }, "score": away_score }
            ],
            "venue": { "fullName": "Highmark Stadium", "address": { "city": "Orchard Park" } },
            "odds": [{ "spread": -6.5, "overUnder": 47.5 }]
        }]
    })
}

#[tokio::test]
async fn espn_scoreboard_is_requested_and_parsed() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/scoreboard")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("seasontype".into(), "2".into()),
            Matcher::UrlEncoded("week".into(), "1".into()),
            Matcher::UrlEncoded("dates".into(), "2025".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "events": [espn_event("MIA", "BUF", "FINAL", "20", "31")] }).to_string())
        .create_async()
        .await;

    let provider = EspnProvider::new(fetcher(0), server.url(), 2025);
    let games = provider.fetch_week_schedule(week("regular-1")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(games.len(), 1);
    let game = &games[0];
    assert_eq!(game.away_team, "MIA");
    assert_eq!(game.home_team, "BUF");
    assert_eq!(game.status.as_deref(), Some("STATUS_FINAL"));
    assert_eq!(game.away_score, Some(20));
    assert_eq!(game.home_score, Some(31));
    assert_eq!(game.venue.as_ref().map(|v| v.name.as_str()), Some("Highmark Stadium"));
    assert_eq!(game.odds.as_ref().and_then(|o| o.over_under), Some(47.5));
}

#[tokio::test]
async fn espn_super_bowl_uses_week_five() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/scoreboard")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("seasontype".into(), "3".into()),
            Matcher::UrlEncoded("week".into(), "5".into()),
        ]))
        .with_status(200)
        .with_body(json!({ "events": [] }).to_string())
        .create_async()
        .await;

    let provider = EspnProvider::new(fetcher(0), server.url(), 2025);
    let super_bowl = SeasonWeek::last();
    let games = provider.fetch_week_schedule(super_bowl).await.unwrap();

    mock.assert_async().await;
    assert!(games.is_empty());
}

#[tokio::test]
async fn server_errors_are_retried_then_reported() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/scoreboard")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(3)
        .create_async()
        .await;

    let provider = EspnProvider::new(fetcher(2), server.url(), 2025);
    let result = provider.fetch_week_schedule(week("preseason-1")).await;

    mock.assert_async().await;
    assert!(matches!(result, Err(ProviderError::Http { status: 503, .. })));
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/scoreboard")
        .match_query(Matcher::Any)
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let provider = EspnProvider::new(fetcher(3), server.url(), 2025);
    let result = provider.fetch_week_schedule(week("preseason-1")).await;

    mock.assert_async().await;
    assert!(matches!(result, Err(ProviderError::Http { status: 404, .. })));
}

#[tokio::test]
async fn malformed_payload_is_a_parse_error() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/scoreboard")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let provider = EspnProvider::new(fetcher(0), server.url(), 2025);
    let result = provider.fetch_week_schedule(week("preseason-1")).await;

    assert!(matches!(result, Err(ProviderError::Parse { .. })));
}

#[tokio::test]
async fn sportsdata_carries_weather_and_skips_byes() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/scores/json/ScoresByWeek/2025REG/2")
        .match_query(Matcher::UrlEncoded("key".into(), "secret-key".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                {
                    "AwayTeam": "CHI", "HomeTeam": "DET",
                    "DateTime": "2025-09-14T13:00:00",
                    "Status": "Scheduled", "SeasonType": 1,
                    "StadiumDetails": { "Name": "Ford Field", "City": "Detroit" },
                    "ForecastTempHigh": 72, "ForecastDescription": "Indoor", "ForecastWindSpeed": 0,
                    "PointSpread": -5.5, "OverUnder": 45.0
                },
                { "AwayTeam": "BYE", "HomeTeam": "KC", "SeasonType": 1 },
                { "AwayTeam": "NYG", "HomeTeam": "WAS", "DateTime": "2025-08-16T19:00:00", "SeasonType": 2 }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let provider = SportsDataProvider::new(fetcher(0), server.url(), "secret-key".to_string(), 2025);
    let games = provider.fetch_week_schedule(week("regular-2")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(games.len(), 1);
    let game = &games[0];
    assert_eq!(game.away_team, "CHI");
    assert_eq!(game.kickoff.as_deref(), Some("2025-09-14T13:00:00"));
    let weather = game.weather.as_ref().expect("weather");
    assert_eq!(weather.temp_f, Some(72));
    assert_eq!(weather.wind_mph, Some(0));
    assert_eq!(game.odds.as_ref().and_then(|o| o.spread), Some(-5.5));
}

#[tokio::test]
async fn api_key_never_appears_in_errors() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let provider = SportsDataProvider::new(fetcher(0), server.url(), "secret-key".to_string(), 2025);
    let error = provider
        .fetch_week_schedule(week("regular-2"))
        .await
        .expect_err("401 must fail");

    assert!(!error.to_string().contains("secret-key"));
}

#[test]
fn schedule_page_rows_are_parsed() {
    let html = r#"
        <table>
          <tr class="header"><th>Away</th><th>Home</th></tr>
          <tr class="game">
            <td class="away">Green Bay Packers</td>
            <td class="home">Chicago Bears</td>
            <td class="kickoff"><time datetime="2025-09-07T20:25:00Z">4:25 PM</time></td>
            <td class="status">Final</td>
            <td class="score">27-17</td>
            <td class="venue">Soldier Field</td>
          </tr>
          <tr class="game">
            <td class="away">Detroit Lions</td>
            <td class="home"></td>
          </tr>
          <tr class="game"><td class="away"></td><td class="home"></td></tr>
        </table>
    "#;

    let games = parse_schedule_page(html).unwrap();

    // The half-filled row is kept for mapping to reject; the empty one is not a game
    assert_eq!(games.len(), 2);
    assert_eq!(games[1].away_team, "Detroit Lions");
    assert_eq!(games[1].home_team, "");
    let game = &games[0];
    assert_eq!(game.away_team, "Green Bay Packers");
    assert_eq!(game.home_team, "Chicago Bears");
    assert_eq!(game.kickoff.as_deref(), Some("2025-09-07T20:25:00Z"));
    assert_eq!(game.status.as_deref(), Some("Final"));
    assert_eq!(game.away_score, Some(27));
    assert_eq!(game.home_score, Some(17));
}

#[tokio::test]
async fn sportsdata_game_without_a_team_is_a_per_game_error() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/scores/json/ScoresByWeek/2025REG/2")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                { "AwayTeam": "CHI", "HomeTeam": "DET", "DateTime": "2025-09-14T13:00:00", "SeasonType": 1 },
                { "AwayTeam": null, "HomeTeam": "KC", "DateTime": "2025-09-14T16:25:00", "SeasonType": 1 }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let store = Arc::new(InMemoryStore::new());
    let provider = Arc::new(SportsDataProvider::new(fetcher(0), server.url(), "secret-key".to_string(), 2025));
    let state = AppState::new(store.clone(), store.clone(), provider, TEST_PRESEASON_START);

    let report = state.sync_service.sync_week(week("regular-2")).await.unwrap();

    assert_eq!(report.games_found, 2);
    assert_eq!(report.created, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("away_team"));
    assert_eq!(store.matchup_count().await, 1);
}

#[test]
fn half_filled_schedule_row_fails_mapping() {
    let html = r#"
        <table>
          <tr class="game">
            <td class="away">Detroit Lions</td>
            <td class="home"></td>
            <td class="kickoff"><time datetime="2025-09-07T17:00:00Z">1:00 PM</time></td>
          </tr>
        </table>
    "#;

    let games = parse_schedule_page(html).unwrap();

    assert_eq!(games.len(), 1);
    assert_eq!(
        map_game(&games[0], week("regular-1"), "scrape"),
        Err(MappingError::MissingField("home_team"))
    );
}
