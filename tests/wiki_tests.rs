//! Integration tests for the dubbing wiki parsers.
//!
//! Tests cover:
//! - Season pages: title, outline, synopsis and the Portuguese cast table
//! - Person pages: infobox fields, photo URL and biography
//! - Pages missing the expected structure

use media_files_organizer::services::dub_wiki::{parse_person_page, parse_season_page};
use media_files_organizer::Error;

const BASE_URL: &str = "https://wikidobragens.fandom.com";

const SEASON_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<h1 id="firstHeading" class="page-header__title">Pokémon: Liga Índigo</h1>
<div id="mw-content-text"><div class="mw-parser-output">
<aside class="portable-infobox"><h2 class="pi-title">Pokémon</h2></aside>
<p><b>Pokémon: Liga Índigo</b> é a primeira temporada de <i>Pokémon</i> .</p>
<table class="wikitable">
  <tr><th>Sinopse</th></tr>
  <tr><td>Ash Ketchum parte de Pallet para se tornar Mestre Pokémon.</td></tr>
</table>
<h2><span class="mw-headline" id="Versão_Portuguesa">Versão Portuguesa</span></h2>
<table class="article-table">
  <tr><th>Personagem</th><th>Dobrador</th></tr>
  <tr><td>Ash Ketchum</td><td><a href="/pt/wiki/Raquel_Rosmaninho">Raquel Rosmaninho</a></td></tr>
  <tr><th>Brock</th><td>Peter Michael (ep. 1-20)</td></tr>
  <tr><td rowspan="2">Misty</td><td>Sandra de Castro</td></tr>
  <tr><td>Sofia de Portugal</td></tr>
  <tr><td>Narrador</td><td>—</td></tr>
  <tr><td>Gary</td><td>N/D</td></tr>
</table>
</div></div>
</body></html>"#;

const PERSON_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div id="mw-content-text"><div class="mw-parser-output">
<aside class="portable-infobox pi-theme-wikia">
  <h2 class="pi-item pi-title" data-source="nome_art">Raquel Rosmaninho</h2>
  <figure class="pi-item pi-image" data-source="image">
    <a href="https://static.wikia.nocookie.net/raquel.jpg">
      <img src="https://static.wikia.nocookie.net/raquel.jpg/revision/latest/scale-to-width-down/268?cb=2020&amp;path-prefix=pt" alt="Raquel">
    </a>
  </figure>
  <div class="pi-item pi-data" data-source="nome">
    <h3 class="pi-data-label">Nome completo</h3>
    <div class="pi-data-value">Raquel Maria Rosmaninho</div>
  </div>
  <div class="pi-item pi-data" data-source="nascimento">
    <h3 class="pi-data-label">Nascimento</h3>
    <div class="pi-data-value">12 de março de 1980 (44 anos)</div>
  </div>
  <div class="pi-item pi-data" data-source="naturalidade">
    <h3 class="pi-data-label">Naturalidade</h3>
    <div class="pi-data-value">Porto, Portugal</div>
  </div>
  <div class="pi-item pi-data" data-source="reconhecimento">
    <h3 class="pi-data-label">Reconhecimento</h3>
    <div class="pi-data-value">Ash Ketchum<br>Naruto Uzumaki</div>
  </div>
</aside>
<h2><span class="mw-headline" id="Biografia">Biografia</span></h2>
<p>Raquel Rosmaninho é uma atriz portuguesa.</p>
<p>Começou a dobrar em 1999.</p>
<h2><span class="mw-headline" id="Trabalhos">Trabalhos</span></h2>
<p>Não faz parte da biografia.</p>
</div></div>
</body></html>"#;

#[test]
fn test_parse_season_page() {
    let url = "https://wikidobragens.fandom.com/pt/wiki/Pokémon_Liga_Índigo";
    let season = parse_season_page(SEASON_PAGE, url, "Liga Índigo", BASE_URL).unwrap();

    assert_eq!(season.url, url);
    assert_eq!(season.name, "Liga Índigo");
    assert_eq!(season.portuguese_title.as_deref(), Some("Pokémon: Liga Índigo"));
    assert_eq!(
        season.overview.as_deref(),
        Some("Ash Ketchum parte de Pallet para se tornar Mestre Pokémon.")
    );
    let outline = season.outline.unwrap();
    assert!(outline.starts_with("Pokémon: Liga Índigo"));
    assert!(outline.ends_with("Pokémon."));

    let cast: Vec<(&str, &str)> = season
        .cast
        .iter()
        .map(|c| (c.role.as_str(), c.name.as_str()))
        .collect();
    assert_eq!(
        cast,
        vec![
            ("Ash Ketchum", "Raquel Rosmaninho"),
            ("Brock", "Peter Michael"),
            ("Misty", "Sandra de Castro"),
            ("Misty", "Sofia de Portugal"),
        ]
    );
    assert_eq!(
        season.cast[0].url.as_deref(),
        Some("https://wikidobragens.fandom.com/pt/wiki/Raquel_Rosmaninho")
    );
    assert_eq!(season.cast[1].url, None);
    assert_eq!(season.skipped_rows, 2);
}

#[test]
fn test_season_page_without_cast_table() {
    let html = r#"<html><body><h1 id="firstHeading">Pokémon</h1></body></html>"#;
    let season = parse_season_page(html, "https://x", "Season 1", BASE_URL).unwrap();

    assert_eq!(season.portuguese_title.as_deref(), Some("Pokémon"));
    assert!(season.cast.is_empty());
    assert_eq!(season.outline, None);
    assert_eq!(season.overview, None);
}

#[test]
fn test_parse_person_page() {
    let url = "https://wikidobragens.fandom.com/pt/wiki/Raquel_Rosmaninho";
    let person = parse_person_page(PERSON_PAGE, url).unwrap();

    assert_eq!(person.name, "Raquel Rosmaninho");
    assert_eq!(person.full_name.as_deref(), Some("Raquel Maria Rosmaninho"));
    assert_eq!(person.birthday.as_deref(), Some("1980-03-12"));
    assert_eq!(person.birthday_year, Some(1980));
    assert_eq!(person.birth_place.as_deref(), Some("Porto, Portugal"));
    assert_eq!(person.famous_roles.as_deref(), Some("Ash Ketchum, Naruto Uzumaki"));
    assert_eq!(
        person.photo_url.as_deref(),
        Some("https://static.wikia.nocookie.net/raquel.jpg/revision/latest/scale-to-width-down/1000?cb=2020&path-prefix=pt")
    );
    assert_eq!(
        person.biography.as_deref(),
        Some("Raquel Rosmaninho é uma atriz portuguesa.\nComeçou a dobrar em 1999.")
    );

    let attributes = person.attributes();
    assert_eq!(attributes.birthday_year, Some(1980));
    assert_eq!(attributes.photo_src_url, person.photo_url);
}

#[test]
fn test_person_birthday_kept_verbatim_when_unparseable() {
    let html = r#"<html><body>
<aside class="portable-infobox">
  <h2 class="pi-title">Peter Michael</h2>
  <div data-source="nascimento"><div class="pi-data-value">Década de 1960</div></div>
</aside></body></html>"#;
    let person = parse_person_page(html, "https://x").unwrap();

    assert_eq!(person.birthday.as_deref(), Some("Década de 1960"));
    assert_eq!(person.birthday_year, None);
    assert_eq!(person.biography, None);
}

#[test]
fn test_person_page_without_infobox() {
    let err = parse_person_page("<html><body><p>Nada</p></body></html>", "https://x").unwrap_err();
    assert!(matches!(err, Error::Scrape(_)));
}
