//! Client for the Portuguese dubbing wiki (Fandom "Wiki Dobragens").
//!
//! Season pages carry a "Versão Portuguesa" cast table; person pages carry a
//! portable infobox and an optional "Biografia" section. Parsing is split from
//! fetching so it can run on saved HTML.

use crate::models::catalog::PersonAttributes;
use crate::models::config::WikiConfig;
use crate::Result;
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

/// Cast table header id.
const CAST_SECTION_ID: &str = "Versão_Portuguesa";
/// Biography header id.
const BIOGRAPHY_SECTION_ID: &str = "Biografia";
/// Row label preceding the synopsis.
const SYNOPSIS_LABEL: &str = "Sinopse";

/// Scraped season page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedSeason {
    pub url: String,
    /// Display name supplied by the caller.
    pub name: String,
    /// Page title (Portuguese name of the season).
    pub portuguese_title: Option<String>,
    /// Lead text between the infobox and the first table.
    pub outline: Option<String>,
    /// Synopsis row.
    pub overview: Option<String>,
    pub cast: Vec<ScrapedCastEntry>,
    /// Cast rows skipped because they held no usable actor.
    pub skipped_rows: usize,
}

/// One row of the Portuguese cast table.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedCastEntry {
    pub name: String,
    /// Character voiced.
    pub role: String,
    /// Absolute URL of the actor's wiki page.
    pub url: Option<String>,
}

/// Scraped person page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedPerson {
    pub url: String,
    pub name: String,
    pub full_name: Option<String>,
    pub birth_place: Option<String>,
    /// `YYYY-MM-DD` when parseable, otherwise the raw text.
    pub birthday: Option<String>,
    pub birthday_year: Option<i32>,
    pub famous_roles: Option<String>,
    pub photo_url: Option<String>,
    pub biography: Option<String>,
}

impl ScrapedPerson {
    /// Catalog attributes for this person.
    pub fn attributes(&self) -> PersonAttributes {
        PersonAttributes {
            full_name: self.full_name.clone(),
            birthday: self.birthday.clone(),
            birthday_year: self.birthday_year,
            birth_place: self.birth_place.clone(),
            biography: self.biography.clone(),
            famous_roles: self.famous_roles.clone(),
            photo_src_url: self.photo_url.clone(),
        }
    }
}

/// Dubbing wiki HTTP client.
pub struct WikiClient {
    base_url: String,
    client: reqwest::Client,
}

impl WikiClient {
    /// Create a client from the wiki configuration.
    pub fn new(config: &WikiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("media_files_organizer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        tracing::debug!("Fetching wiki page: {}", url);
        let html = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(html)
    }

    /// Check that the wiki answers.
    pub async fn health_check(&self) -> Result<bool> {
        let resp = self.client.get(&self.base_url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Fetch and parse a season page.
    pub async fn fetch_season(&self, url: &str, name: &str) -> Result<ScrapedSeason> {
        let html = self.fetch_html(url).await?;
        parse_season_page(&html, url, name, &self.base_url)
    }

    /// Fetch and parse a person page.
    pub async fn fetch_person(&self, url: &str) -> Result<ScrapedPerson> {
        let html = self.fetch_html(url).await?;
        parse_person_page(&html, url)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| crate::Error::scrape(format!("bad selector {}: {}", css, e)))
}

/// Text of an element with every text node trimmed and concatenated.
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Text of an element, trimmed.
fn plain_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Remove spaces before punctuation and inside brackets.
pub fn clean_text(text: &str) -> String {
    let mut text = text.to_string();
    let rules = [
        (r"\s([,.!?;:])", "$1"),
        (r"([\(\[\{])\s", "$1"),
        (r"\s([\)\]\}])", "$1"),
    ];
    for (pattern, replacement) in rules {
        if let Ok(re) = regex::Regex::new(pattern) {
            text = re.replace_all(&text, replacement).into_owned();
        }
    }
    text
}

/// Parse a season page.
pub fn parse_season_page(html: &str, url: &str, name: &str, base_url: &str) -> Result<ScrapedSeason> {
    let doc = Html::parse_document(html);

    let mut season = ScrapedSeason {
        url: url.to_string(),
        name: name.to_string(),
        ..Default::default()
    };

    let heading = selector("h1#firstHeading")?;
    season.portuguese_title = doc
        .select(&heading)
        .next()
        .map(stripped_text)
        .and_then(non_empty);

    season.outline = parse_outline(&doc)?;
    season.overview = parse_synopsis(&doc)?;

    let Some(table) = find_cast_table(&doc)? else {
        tracing::warn!("No Portuguese cast table found on {}", url);
        return Ok(season);
    };

    let row_sel = selector("tr")?;
    let td_sel = selector("td")?;
    let mut role = String::new();

    // First row is the header.
    for (index, row) in table.select(&row_sel).enumerate().skip(1) {
        let columns: Vec<ElementRef<'_>> = row.select(&td_sel).collect();

        let actor_column = match columns.as_slice() {
            [] => continue,
            [only] => {
                // Role cell is either a sibling `th` or spans from a previous row.
                if let Some(th) = only
                    .prev_siblings()
                    .filter_map(ElementRef::wrap)
                    .find(|e| e.value().name() == "th")
                {
                    role = stripped_text(th);
                }
                *only
            }
            [role_column, actor_column, ..] => {
                role = stripped_text(*role_column);
                *actor_column
            }
        };

        match parse_actor_column(actor_column, &role, base_url) {
            Some(entry) => season.cast.push(entry),
            None => {
                tracing::warn!(
                    "Skipping cast row {} ({}) on {}: no usable actor",
                    index,
                    if role.is_empty() { "no role" } else { role.as_str() },
                    url
                );
                season.skipped_rows += 1;
            }
        }
    }

    tracing::debug!(
        "Parsed {} cast entries ({} skipped) from {}",
        season.cast.len(),
        season.skipped_rows,
        url
    );

    Ok(season)
}

/// Lead text between the infobox and the first table.
fn parse_outline(doc: &Html) -> Result<Option<String>> {
    let aside_sel = selector("div#mw-content-text div.mw-parser-output aside")?;
    let Some(aside) = doc.select(&aside_sel).next() else {
        return Ok(None);
    };

    let mut parts = Vec::new();
    for node in aside.next_siblings() {
        if let Some(element) = ElementRef::wrap(node) {
            if element.value().name() == "table" {
                break;
            }
            parts.push(stripped_text(element));
        } else if let Some(text) = node.value().as_text() {
            parts.push(text.trim().to_string());
        }
    }

    let joined = parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(non_empty(clean_text(&joined)))
}

/// Text of the row following the "Sinopse" label row.
fn parse_synopsis(doc: &Html) -> Result<Option<String>> {
    let row_sel = selector("tr")?;
    let Some(label_row) = doc
        .select(&row_sel)
        .find(|row| stripped_text(*row) == SYNOPSIS_LABEL)
    else {
        return Ok(None);
    };

    Ok(label_row
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "tr")
        .map(stripped_text)
        .and_then(non_empty))
}

/// The first `table.article-table` after the "Versão Portuguesa" heading.
fn find_cast_table(doc: &Html) -> Result<Option<ElementRef<'_>>> {
    let header_sel = selector(&format!("span[id=\"{}\"]", CAST_SECTION_ID))?;
    let Some(header) = doc.select(&header_sel).next() else {
        return Ok(None);
    };

    let Some(h2) = header
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "h2")
    else {
        return Ok(None);
    };

    Ok(h2.next_siblings().filter_map(ElementRef::wrap).find(|e| {
        e.value().name() == "table" && e.value().classes().any(|c| c == "article-table")
    }))
}

/// Parse an actor cell. `None` for placeholder cells.
fn parse_actor_column(column: ElementRef<'_>, role: &str, base_url: &str) -> Option<ScrapedCastEntry> {
    let raw = stripped_text(column);
    if raw.is_empty() || raw == "—" {
        return None;
    }

    // Drop notes such as "(ep. 1-10)".
    let name = match regex::Regex::new(r"\(.+\)") {
        Ok(re) => re.replace_all(&raw, "").trim().to_string(),
        Err(_) => raw,
    };
    if name.is_empty() || name == "N/A" || name == "N/D" {
        return None;
    }

    let url = selector("a").ok().and_then(|a| {
        column
            .select(&a)
            .next()
            .and_then(|link| link.value().attr("href"))
            .map(|href| absolute_url(base_url, href))
    });

    Some(ScrapedCastEntry {
        name,
        role: role.to_string(),
        url,
    })
}

fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{}{}", base_url, href)
    } else {
        format!("{}/{}", base_url, href)
    }
}

/// Parse a person page.
pub fn parse_person_page(html: &str, url: &str) -> Result<ScrapedPerson> {
    let doc = Html::parse_document(html);

    let infobox_sel = selector("aside.portable-infobox")?;
    let infobox = doc
        .select(&infobox_sel)
        .next()
        .ok_or_else(|| crate::Error::scrape(format!("no infobox on {}", url)))?;

    let title_sel = selector("h2.pi-title")?;
    let name = infobox
        .select(&title_sel)
        .next()
        .map(plain_text)
        .and_then(non_empty)
        .ok_or_else(|| crate::Error::scrape(format!("no name in infobox on {}", url)))?;

    let mut person = ScrapedPerson {
        url: url.to_string(),
        name,
        ..Default::default()
    };

    person.full_name = infobox_value(infobox, "nome")?.map(plain_text).and_then(non_empty);
    person.birth_place = infobox_value(infobox, "naturalidade")?
        .map(plain_text)
        .and_then(non_empty);

    if let Some(value) = infobox_value(infobox, "nascimento")? {
        let text = plain_text(value);
        // Drop the age, e.g. "12 de março de 1980 (44 anos)".
        let cleaned = text.split('(').next().unwrap_or("").trim().to_string();
        match parse_portuguese_date(&cleaned) {
            Some(date) => {
                person.birthday = Some(date.format("%Y-%m-%d").to_string());
                person.birthday_year = Some(chrono::Datelike::year(&date));
            }
            None => person.birthday = non_empty(cleaned),
        }
    }

    if let Some(value) = infobox_value(infobox, "reconhecimento")? {
        let roles: Vec<&str> = value
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        person.famous_roles = non_empty(roles.join(", "));
    }

    let img_sel = selector("figure[data-source=\"image\"] img")?;
    if let Some(src) = infobox
        .select(&img_sel)
        .next()
        .and_then(|img| img.value().attr("src"))
    {
        person.photo_url = Some(full_size_image(src));
    }

    person.biography = parse_biography(&doc)?;

    Ok(person)
}

/// The `pi-data-value` element of an infobox row.
fn infobox_value<'a>(infobox: ElementRef<'a>, source: &str) -> Result<Option<ElementRef<'a>>> {
    let sel = selector(&format!(
        "div[data-source=\"{}\"] div.pi-data-value",
        source
    ))?;
    Ok(infobox.select(&sel).next())
}

/// Ask the image CDN for the large rendition.
fn full_size_image(src: &str) -> String {
    let src = src.replace("&amp;", "&");
    match regex::Regex::new(r"scale-to-width-down/\d+") {
        Ok(re) => re
            .replace_all(&src, "scale-to-width-down/1000")
            .into_owned(),
        Err(_) => src,
    }
}

/// Paragraphs after the "Biografia" heading until the next `h2`.
fn parse_biography(doc: &Html) -> Result<Option<String>> {
    let header_sel = selector(&format!("span[id=\"{}\"]", BIOGRAPHY_SECTION_ID))?;
    let Some(header) = doc.select(&header_sel).next() else {
        return Ok(None);
    };
    let Some(heading) = header.parent().and_then(ElementRef::wrap) else {
        return Ok(None);
    };

    let mut paragraphs = Vec::new();
    for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
        match sibling.value().name() {
            "h2" => break,
            "p" => paragraphs.push(plain_text(sibling)),
            _ => {}
        }
    }

    Ok(non_empty(paragraphs.join("\n")))
}

/// Parse a Portuguese long date such as "12 de março de 1980".
pub fn parse_portuguese_date(text: &str) -> Option<NaiveDate> {
    let re = regex::Regex::new(r"(?i)^(\d{1,2})\.?º?\s+de\s+(\p{L}+)\s+de\s+(\d{4})$").ok()?;
    let caps = re.captures(text.trim())?;

    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month = match caps.get(2)?.as_str().to_lowercase().as_str() {
        "janeiro" => 1,
        "fevereiro" => 2,
        "março" | "marco" => 3,
        "abril" => 4,
        "maio" => 5,
        "junho" => 6,
        "julho" => 7,
        "agosto" => 8,
        "setembro" => 9,
        "outubro" => 10,
        "novembro" => 11,
        "dezembro" => 12,
        _ => return None,
    };
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}
