//! Person command implementations.

use super::truncate;
use crate::core::scrape;
use crate::models::config::Config;
use crate::services::dub_wiki::WikiClient;
use crate::store::Database;
use crate::Result;
use colored::Colorize;

/// Scrape a person page into the catalog.
pub async fn scrape_person(config: &Config, url: &str) -> Result<()> {
    let db = Database::open(&config.database.path)?;
    let wiki = WikiClient::new(&config.wiki)?;

    println!("{} {}", "[SCRAPE]".cyan(), url);
    let person = scrape::scrape_person(&db, &wiki, url).await?;

    println!(
        "{} {} (id {}, {})",
        "[OK]".green(),
        person.record.name.bold(),
        person.record.id,
        person.outcome
    );
    if let Some(ref birthday) = person.record.birthday {
        println!("  Born: {}", birthday);
    }
    if let Some(ref roles) = person.record.famous_roles {
        println!("  Known for: {}", roles);
    }

    Ok(())
}

/// List catalogued people.
pub fn list_people(config: &Config) -> Result<()> {
    let db = Database::open(&config.database.path)?;
    let people = db.list_people()?;

    if people.is_empty() {
        println!("{}", "No people catalogued.".yellow());
        return Ok(());
    }

    println!("{}", format!("People ({}):", people.len()).bold().cyan());
    println!(" {:>5} | {:<30} | {:>4} | {}", "ID", "Name", "Born", "Birth place");
    println!("{}", "-".repeat(70));
    for person in people {
        println!(
            " {:>5} | {:<30} | {:>4} | {}",
            person.id,
            truncate(&person.name, 30),
            person.birthday_year.map(|y| y.to_string()).unwrap_or_default(),
            person.birth_place.unwrap_or_default()
        );
    }

    Ok(())
}
