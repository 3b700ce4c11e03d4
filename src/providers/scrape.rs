use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::models::week::SeasonWeek;
use crate::providers::{GameRecord, HttpFetcher, ProviderError, ScheduleProvider, VenueInfo};

/// Scrapes a public schedule page.
///
/// Expected layout: one `tr.game` row per game with `td.away`, `td.home`,
/// `td.kickoff` (a `<time datetime>` element or plain text), and optional
/// `td.status`, `td.score` ("away-home") and `td.venue` cells.
pub struct ScrapeProvider {
    fetcher: HttpFetcher,
    url_template: String,
    season_year: i32,
}

impl ScrapeProvider {
    pub fn new(fetcher: HttpFetcher, url_template: String, season_year: i32) -> Self {
        Self {
            fetcher,
            url_template,
            season_year,
        }
    }

    fn page_url(&self, week: SeasonWeek) -> String {
        self.url_template
            .replace("{season}", &self.season_year.to_string())
            .replace("{phase}", week.phase.as_str())
            .replace("{week}", &week.week.to_string())
    }
}

#[async_trait]
impl ScheduleProvider for ScrapeProvider {
    fn name(&self) -> &'static str {
        "scrape"
    }

    async fn fetch_week_schedule(&self, week: SeasonWeek) -> Result<Vec<GameRecord>, ProviderError> {
        let url = self.page_url(week);
        let body = self.fetcher.get_text(&url).await?;
        let games = parse_schedule_page(&body)?;
        tracing::info!("Scraped {} game(s) for {} from {}", games.len(), week, url);
        Ok(games)
    }
}

/// Parse schedule rows out of an HTML page. Rows without any team are skipped.
pub fn parse_schedule_page(html: &str) -> Result<Vec<GameRecord>, ProviderError> {
    let document = Html::parse_document(html);
    let row_selector = selector("tr.game")?;
    let away_selector = selector("td.away")?;
    let home_selector = selector("td.home")?;
    let kickoff_selector = selector("td.kickoff")?;
    let time_selector = selector("time")?;
    let status_selector = selector("td.status")?;
    let score_selector = selector("td.score")?;
    let venue_selector = selector("td.venue")?;

    let mut games = Vec::new();
    for row in document.select(&row_selector) {
        let away = cell_text(&row, &away_selector);
        let home = cell_text(&row, &home_selector);
        // A row naming neither team is layout, not a game; a half-filled row
        // is kept so mapping reports the missing side
        if away.is_none() && home.is_none() {
            continue;
        }
        let away_team = away.unwrap_or_default();
        let home_team = home.unwrap_or_default();

        let kickoff = row.select(&kickoff_selector).next().and_then(|cell| {
            cell.select(&time_selector)
                .next()
                .and_then(|time| time.value().attr("datetime").map(str::to_string))
                .or_else(|| text_of(&cell))
        });

        let (away_score, home_score) = cell_text(&row, &score_selector)
            .and_then(|score| parse_score(&score))
            .map(|(away, home)| (Some(away), Some(home)))
            .unwrap_or((None, None));

        games.push(GameRecord {
            away_team,
            home_team,
            kickoff,
            status: cell_text(&row, &status_selector),
            away_score,
            home_score,
            venue: cell_text(&row, &venue_selector).map(|name| VenueInfo { name, city: None }),
            weather: None,
            odds: None,
        });
    }

    Ok(games)
}

fn selector(css: &str) -> Result<Selector, ProviderError> {
    Selector::parse(css).map_err(|e| ProviderError::InvalidRequest(format!("bad selector '{}': {:?}", css, e)))
}

fn cell_text(row: &ElementRef, cell: &Selector) -> Option<String> {
    row.select(cell).next().and_then(|el| text_of(&el))
}

fn text_of(element: &ElementRef) -> Option<String> {
    let text = element.text().collect::<Vec<_>>().join(" ");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// "24-17" or "24 - 17", away score first
fn parse_score(score: &str) -> Option<(i32, i32)> {
    let (away, home) = score.split_once('-')?;
    Some((away.trim().parse().ok()?, home.trim().parse().ok()?))
}
