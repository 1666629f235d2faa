//! Dub cast scraping workflow.
//!
//! Fetches a season page from the dubbing wiki and records the season, its
//! voice actors and their roles in the catalog.

use crate::models::catalog::{Person, Season, SeasonAttributes, UpsertOutcome, Upserted};
use crate::services::dub_wiki::{ScrapedCastEntry, ScrapedPerson, ScrapedSeason, WikiClient};
use crate::store::Database;
use crate::Result;

/// Role type recorded for scraped cast.
pub const ACTOR_ROLE: &str = "actor";

/// Outcome of scraping one season.
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub season: Season,
    pub season_outcome: UpsertOutcome,
    pub people_created: usize,
    pub people_existing: usize,
    pub roles_created: usize,
    pub roles_updated: usize,
    pub roles_unchanged: usize,
    /// Cast rows the page held but that had no usable actor.
    pub skipped_rows: usize,
    /// Person pages that could not be fetched or parsed.
    pub person_page_failures: usize,
}

/// Default display name of a season.
pub fn default_season_name(season_number: i32) -> String {
    format!("Season {}", season_number)
}

/// Scrape a season page and record its dub cast.
pub async fn scrape_season(
    db: &Database,
    wiki: &WikiClient,
    url: &str,
    show_id: i64,
    season_number: i32,
    name: Option<&str>,
) -> Result<ScrapeReport> {
    let display_name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_season_name(season_number));

    // Fail before any network traffic when the show is unknown.
    if db.get_show(show_id)?.is_none() {
        return Err(crate::Error::Validation(format!(
            "show id {} does not exist; add it with `show add` first",
            show_id
        )));
    }

    tracing::info!("Scraping season {} of show {} from {}", season_number, show_id, url);
    let scraped = wiki.fetch_season(url, &display_name).await?;

    let mut person_pages = Vec::with_capacity(scraped.cast.len());
    let mut failures = 0;
    for entry in &scraped.cast {
        let page = match entry.url.as_deref() {
            Some(person_url) => match wiki.fetch_person(person_url).await {
                Ok(person) => Some(person),
                Err(e) => {
                    tracing::warn!(
                        "Could not scrape {} ({}), keeping the bare name: {}",
                        entry.name,
                        person_url,
                        e
                    );
                    failures += 1;
                    None
                }
            },
            None => None,
        };
        person_pages.push(page);
    }

    let mut report = record_season(db, show_id, season_number, &scraped, &person_pages)?;
    report.person_page_failures = failures;
    Ok(report)
}

/// Record an already scraped season.
///
/// `person_pages[i]` holds the person page of `scraped.cast[i]`, when one was
/// fetched.
pub fn record_season(
    db: &Database,
    show_id: i64,
    season_number: i32,
    scraped: &ScrapedSeason,
    person_pages: &[Option<ScrapedPerson>],
) -> Result<ScrapeReport> {
    let plot = scraped.overview.clone().or_else(|| scraped.outline.clone());
    let season = db.create_or_update_season(
        show_id,
        season_number,
        &SeasonAttributes {
            title: scraped.name.clone(),
            plot,
            ..Default::default()
        },
    )?;

    let mut report = ScrapeReport {
        season: season.record.clone(),
        season_outcome: season.outcome,
        people_created: 0,
        people_existing: 0,
        roles_created: 0,
        roles_updated: 0,
        roles_unchanged: 0,
        skipped_rows: scraped.skipped_rows,
        person_page_failures: 0,
    };

    for (index, entry) in scraped.cast.iter().enumerate() {
        let page = person_pages.get(index).and_then(Option::as_ref);
        let person = record_cast_member(db, entry, page)?;
        if person.is_created() {
            report.people_created += 1;
        } else {
            report.people_existing += 1;
        }

        let character = Some(entry.role.as_str()).filter(|r| !r.is_empty());
        let role = db.create_or_update_role(
            character,
            person.record.id,
            show_id,
            season.record.id,
            ACTOR_ROLE,
        )?;
        match role.outcome {
            UpsertOutcome::Created => report.roles_created += 1,
            UpsertOutcome::Updated => report.roles_updated += 1,
            UpsertOutcome::Unchanged => report.roles_unchanged += 1,
        }
    }

    tracing::info!(
        "Season {} of show {}: {} people created, {} roles created",
        season_number,
        show_id,
        report.people_created,
        report.roles_created
    );

    Ok(report)
}

fn record_cast_member(
    db: &Database,
    entry: &ScrapedCastEntry,
    page: Option<&ScrapedPerson>,
) -> Result<Upserted<Person>> {
    match page {
        Some(person) => {
            // Same key as a person scrape of that page.
            let name = if person.name.trim().is_empty() {
                &entry.name
            } else {
                &person.name
            };
            db.find_or_create_person(name, &person.attributes())
        }
        None => db.find_or_create_person(&entry.name, &Default::default()),
    }
}

/// Scrape a single person page into the catalog.
pub async fn scrape_person(db: &Database, wiki: &WikiClient, url: &str) -> Result<Upserted<Person>> {
    tracing::info!("Scraping person from {}", url);
    let scraped = wiki.fetch_person(url).await?;
    db.find_or_create_person(&scraped.name, &scraped.attributes())
}
