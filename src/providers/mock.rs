use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::league::teams::all_abbreviations;
use crate::league::timing::{parse_preseason_start, WeekCalculator, DEFAULT_PRESEASON_START};
use crate::models::week::SeasonWeek;
use crate::providers::{GameRecord, ProviderError, ScheduleProvider};

/// In-process schedule source for local development and tests.
///
/// Weeks can be scripted explicitly; unscripted weeks are either empty or,
/// for a generating mock, a deterministic round-robin slate.
pub struct MockProvider {
    weeks: RwLock<HashMap<SeasonWeek, Vec<GameRecord>>>,
    generate_from: Option<NaiveDate>,
    failing: AtomicBool,
}

impl MockProvider {
    /// Only returns weeks set through `set_week`
    pub fn scripted() -> Self {
        Self {
            weeks: RwLock::new(HashMap::new()),
            generate_from: None,
            failing: AtomicBool::new(false),
        }
    }

    /// Generates a full slate for every unscripted week
    pub fn generated(preseason_start: &str) -> Self {
        let start = parse_preseason_start(preseason_start)
            .or_else(|| parse_preseason_start(DEFAULT_PRESEASON_START));
        Self {
            generate_from: start,
            ..Self::scripted()
        }
    }

    pub async fn set_week(&self, week: SeasonWeek, games: Vec<GameRecord>) {
        self.weeks.write().await.insert(week, games);
    }

    /// Edit one scripted game in place; returns false when it is not scripted
    pub async fn update_game<F>(&self, week: SeasonWeek, away_team: &str, home_team: &str, update: F) -> bool
    where
        F: FnOnce(&mut GameRecord),
    {
        let mut weeks = self.weeks.write().await;
        let game = weeks
            .get_mut(&week)
            .and_then(|games| {
                games
                    .iter_mut()
                    .find(|g| g.away_team == away_team && g.home_team == home_team)
            });
        match game {
            Some(game) => {
                update(game);
                true
            }
            None => false,
        }
    }

    /// Make every fetch fail as if the source were unreachable
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn generate_week(&self, start: NaiveDate, week: SeasonWeek) -> Vec<GameRecord> {
        let kickoff = WeekCalculator::new()
            .default_kickoff(start, week)
            .to_rfc3339();
        let teams: Vec<&str> = all_abbreviations().collect();
        let round = (week.unified() as usize - 1) % (teams.len() - 1);

        // Circle method: first team fixed, the rest rotate one seat per round
        let mut seats = vec![teams[0]];
        let rest = &teams[1..];
        seats.extend((0..rest.len()).map(|i| rest[(i + round) % rest.len()]));

        let half = seats.len() / 2;
        (0..half)
            .map(|i| {
                let (a, b) = (seats[i], seats[seats.len() - 1 - i]);
                let (away, home) = if (round + i) % 2 == 0 { (a, b) } else { (b, a) };
                GameRecord {
                    away_team: away.to_string(),
                    home_team: home.to_string(),
                    kickoff: Some(kickoff.clone()),
                    status: Some("Scheduled".to_string()),
                    ..Default::default()
                }
            })
            .collect()
    }
}

#[async_trait]
impl ScheduleProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_week_schedule(&self, week: SeasonWeek) -> Result<Vec<GameRecord>, ProviderError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ProviderError::Network {
                url: format!("mock://schedule/{}", week),
                message: "mock source unavailable".to_string(),
            });
        }

        if let Some(games) = self.weeks.read().await.get(&week) {
            return Ok(games.clone());
        }

        Ok(self
            .generate_from
            .map(|start| self.generate_week(start, week))
            .unwrap_or_default())
    }
}
