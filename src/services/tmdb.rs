//! TMDB API client.

use crate::models::config;
use crate::models::media::{Credit, EpisodeMetadata, SeasonMetadata, TvShowMetadata};
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// TMDB client configuration.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key or Bearer token (JWT)
    pub api_key: String,
    pub language: String,
    /// Whether to use Bearer token authentication (API v4 style)
    pub use_bearer: bool,
}

impl TmdbConfig {
    /// Create client config from the application config.
    /// Supports both API key (v3) and Bearer token (v4) formats.
    pub fn from_config(config: &config::TmdbConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(crate::Error::TmdbApiKeyMissing)?;

        // Bearer tokens start with "eyJ" (base64 encoded JWT header)
        let use_bearer = api_key.starts_with("eyJ");

        Ok(Self {
            api_key,
            language: config.language.clone(),
            use_bearer,
        })
    }
}

/// TMDB API client.
pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

/// TV show details.
#[derive(Debug, Deserialize)]
pub struct TvDetails {
    pub id: u64,
    pub name: String,
    pub original_name: String,
    pub first_air_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub number_of_seasons: u16,
    #[serde(default)]
    pub number_of_episodes: u16,
    pub status: Option<String>,
    pub vote_average: Option<f32>,
    pub vote_count: Option<u32>,
    pub genres: Option<Vec<Genre>>,
    pub credits: Option<TvCredits>,
    pub external_ids: Option<ExternalIds>,
}

/// Genre.
#[derive(Debug, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// TV Credits.
#[derive(Debug, Deserialize)]
pub struct TvCredits {
    pub cast: Option<Vec<CastMember>>,
}

/// External IDs for a TV show.
#[derive(Debug, Deserialize)]
pub struct ExternalIds {
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<u64>,
}

/// Season details with aggregate credits.
#[derive(Debug, Deserialize)]
pub struct SeasonDetails {
    pub name: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub season_number: u16,
    pub air_date: Option<String>,
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub episodes: Vec<EpisodeInfo>,
    pub aggregate_credits: Option<AggregateCredits>,
}

/// Episode info within a season.
#[derive(Debug, Deserialize)]
pub struct EpisodeInfo {
    pub name: String,
    pub overview: Option<String>,
    pub episode_number: u16,
    pub season_number: u16,
    pub air_date: Option<String>,
    pub still_path: Option<String>,
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub guest_stars: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// Aggregate credits across all episodes of a season.
#[derive(Debug, Deserialize)]
pub struct AggregateCredits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// Cast member, either per-credit (`character`) or aggregate (`roles`).
#[derive(Debug, Deserialize)]
pub struct CastMember {
    pub name: String,
    pub original_name: Option<String>,
    pub character: Option<String>,
    #[serde(default)]
    pub roles: Vec<AggregateRole>,
    pub profile_path: Option<String>,
    pub order: Option<u32>,
}

/// One character in aggregate credits.
#[derive(Debug, Deserialize)]
pub struct AggregateRole {
    pub character: Option<String>,
}

/// Crew member, either per-credit (`job`) or aggregate (`jobs`).
#[derive(Debug, Deserialize)]
pub struct CrewMember {
    pub name: String,
    pub original_name: Option<String>,
    pub job: Option<String>,
    #[serde(default)]
    pub jobs: Vec<AggregateJob>,
    pub profile_path: Option<String>,
}

/// One job in aggregate credits.
#[derive(Debug, Deserialize)]
pub struct AggregateJob {
    pub job: Option<String>,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Create a new TMDB client from the application config.
    pub fn from_config(config: &config::TmdbConfig) -> Result<Self> {
        Ok(Self::new(TmdbConfig::from_config(config)?))
    }

    /// Build a request with proper authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        if self.config.use_bearer {
            request.header("Authorization", format!("Bearer {}", self.config.api_key))
        } else {
            request
        }
    }

    /// Build URL with optional api_key parameter (only for v3 style).
    fn build_url(&self, path: &str, extra_params: &str) -> String {
        if self.config.use_bearer {
            format!(
                "{}/{}?language={}{}",
                TMDB_BASE_URL, path, self.config.language, extra_params
            )
        } else {
            format!(
                "{}/{}?api_key={}&language={}{}",
                TMDB_BASE_URL, path, self.config.api_key, self.config.language, extra_params
            )
        }
    }

    /// GET a JSON endpoint, turning non-2xx statuses into errors.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, extra_params: &str) -> Result<T> {
        let url = self.build_url(path, extra_params);
        tracing::debug!("TMDB GET {}", path);

        let resp = self.build_request(&url).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(crate::Error::TmdbApiKeyInvalid);
        }
        if !status.is_success() {
            return Err(crate::Error::TmdbRequest {
                status: status.as_u16(),
                endpoint: path.to_string(),
            });
        }

        Ok(resp.json().await?)
    }

    /// Verify API key is valid.
    pub async fn verify_api_key(&self) -> Result<bool> {
        let url = if self.config.use_bearer {
            format!("{}/authentication", TMDB_BASE_URL)
        } else {
            format!(
                "{}/authentication?api_key={}",
                TMDB_BASE_URL, self.config.api_key
            )
        };

        let resp = self.build_request(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Get TV show details.
    pub async fn get_tv_details(&self, tv_id: u64) -> Result<TvDetails> {
        self.get_json(
            &format!("tv/{}", tv_id),
            "&append_to_response=external_ids,credits",
        )
        .await
    }

    /// Get season details, including aggregate cast and crew.
    pub async fn get_season_details(&self, tv_id: u64, season_number: u16) -> Result<SeasonDetails> {
        match self
            .get_json(
                &format!("tv/{}/season/{}", tv_id, season_number),
                "&append_to_response=aggregate_credits",
            )
            .await
        {
            Err(crate::Error::TmdbRequest { status: 404, .. }) => {
                Err(crate::Error::SeasonNotFound {
                    tmdb_id: tv_id,
                    season: season_number,
                })
            }
            other => other,
        }
    }

    /// Fetch a show and its mapped metadata.
    pub async fn fetch_show(&self, tv_id: u64) -> Result<TvShowMetadata> {
        Ok(show_metadata(self.get_tv_details(tv_id).await?))
    }

    /// Fetch a season and its mapped metadata.
    pub async fn fetch_season(&self, tv_id: u64, season_number: u16) -> Result<SeasonMetadata> {
        Ok(season_metadata(
            self.get_season_details(tv_id, season_number).await?,
        ))
    }

    /// Download an image.
    pub async fn download_image(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Full-size image URL for a TMDB image path.
pub fn image_url(path: &str) -> String {
    format!("{}/original{}", TMDB_IMAGE_BASE_URL, path)
}

/// Map a cast member to a credit of the given kind.
fn cast_credit(member: CastMember, kind: &str) -> Credit {
    let role = member
        .character
        .filter(|c| !c.is_empty())
        .or_else(|| member.roles.into_iter().find_map(|r| r.character))
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    Credit {
        name: member.name,
        original_name: member.original_name,
        kind: kind.to_string(),
        role: Some(role),
        photo: member.profile_path.as_deref().map(image_url),
        order: member.order,
    }
}

/// Map a crew member to a credit named after its job.
fn crew_credit(member: CrewMember) -> Credit {
    let job = member
        .job
        .or_else(|| member.jobs.into_iter().find_map(|j| j.job))
        .unwrap_or_else(|| "Crew".to_string());

    Credit {
        name: member.name,
        original_name: member.original_name,
        kind: job,
        role: None,
        photo: member.profile_path.as_deref().map(image_url),
        order: None,
    }
}

/// Extract the year from a `YYYY-MM-DD` date.
fn year_of(date: Option<&str>) -> Option<u16> {
    date.and_then(|d| d.get(..4)).and_then(|y| y.parse().ok())
}

/// Map TV details to show metadata.
pub fn show_metadata(details: TvDetails) -> TvShowMetadata {
    let cast = details
        .credits
        .and_then(|c| c.cast)
        .unwrap_or_default()
        .into_iter()
        .map(|m| cast_credit(m, "Actor"))
        .collect();

    let (imdb_id, tvdb_id) = details
        .external_ids
        .map(|ids| (ids.imdb_id.filter(|id| !id.is_empty()), ids.tvdb_id))
        .unwrap_or((None, None));

    TvShowMetadata {
        tmdb_id: details.id,
        imdb_id,
        tvdb_id,
        year: year_of(details.first_air_date.as_deref()),
        first_air_date: details.first_air_date.filter(|d| !d.is_empty()),
        name: details.name,
        original_name: details.original_name,
        overview: details.overview.filter(|o| !o.is_empty()),
        status: details.status,
        genres: details
            .genres
            .unwrap_or_default()
            .into_iter()
            .map(|g| g.name)
            .collect(),
        number_of_seasons: details.number_of_seasons,
        number_of_episodes: details.number_of_episodes,
        rating: details.vote_average,
        votes: details.vote_count,
        poster_url: details.poster_path.as_deref().map(image_url),
        backdrop_url: details.backdrop_path.as_deref().map(image_url),
        cast,
    }
}

/// Map season details to season metadata.
pub fn season_metadata(details: SeasonDetails) -> SeasonMetadata {
    let (cast, crew) = match details.aggregate_credits {
        Some(credits) => (
            credits
                .cast
                .into_iter()
                .map(|m| cast_credit(m, "Actor"))
                .collect(),
            credits.crew.into_iter().map(crew_credit).collect(),
        ),
        None => (Vec::new(), Vec::new()),
    };

    let episodes = details
        .episodes
        .into_iter()
        .map(|e| EpisodeMetadata {
            season_number: e.season_number,
            episode_number: e.episode_number,
            name: e.name,
            air_date: e.air_date.filter(|d| !d.is_empty()),
            overview: e.overview.filter(|o| !o.is_empty()),
            rating: e.vote_average,
            still_url: e.still_path.as_deref().map(image_url),
            guest_stars: e
                .guest_stars
                .into_iter()
                .map(|m| cast_credit(m, "GuestStar"))
                .collect(),
            crew: e.crew.into_iter().map(crew_credit).collect(),
        })
        .collect();

    SeasonMetadata {
        season_number: details.season_number,
        name: details.name,
        overview: details.overview.filter(|o| !o.is_empty()),
        air_date: details.air_date.filter(|d| !d.is_empty()),
        rating: details.vote_average,
        poster_url: details.poster_path.as_deref().map(image_url),
        episodes,
        cast,
        crew,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEASON_JSON: &str = r#"{
        "name": "Sun & Moon",
        "overview": "Ash travels to Alola.",
        "poster_path": "/alola.jpg",
        "season_number": 20,
        "air_date": "2016-11-17",
        "vote_average": 7.4,
        "episodes": [
            {
                "name": "Alola to New Adventure!",
                "overview": "",
                "episode_number": 1,
                "season_number": 20,
                "air_date": "2016-11-17",
                "still_path": null,
                "vote_average": 7.0,
                "guest_stars": [
                    {"name": "Guest", "original_name": "Guest", "character": "", "roles": [], "profile_path": null, "order": 500}
                ],
                "crew": [
                    {"name": "Kunihiko Yuyama", "job": "Director", "profile_path": null}
                ]
            }
        ],
        "aggregate_credits": {
            "cast": [
                {"name": "Sarah Natochenny", "original_name": "Sarah Natochenny",
                 "roles": [{"character": "Ash Ketchum", "episode_count": 146}],
                 "profile_path": "/sarah.jpg", "order": 0}
            ],
            "crew": [
                {"name": "Shoji Yonemura", "jobs": [{"job": "Writer"}], "profile_path": null}
            ]
        }
    }"#;

    #[test]
    fn test_season_metadata_mapping() {
        let details: SeasonDetails = serde_json::from_str(SEASON_JSON).unwrap();
        let season = season_metadata(details);

        assert_eq!(season.season_number, 20);
        assert_eq!(season.poster_url.as_deref(), Some("https://image.tmdb.org/t/p/original/alola.jpg"));
        assert_eq!(season.cast[0].role.as_deref(), Some("Ash Ketchum"));
        assert_eq!(season.cast[0].kind, "Actor");
        assert_eq!(season.crew[0].kind, "Writer");

        let episode = season.episode(1).unwrap();
        assert_eq!(episode.overview, None);
        assert_eq!(episode.still_url, None);
        assert_eq!(episode.guest_stars[0].role.as_deref(), Some("Unknown"));
        assert_eq!(episode.guest_stars[0].kind, "GuestStar");
        assert_eq!(episode.crew[0].kind, "Director");
    }

    #[test]
    fn test_show_metadata_mapping() {
        let details: TvDetails = serde_json::from_str(
            r#"{
                "id": 60572,
                "name": "Pokémon",
                "original_name": "ポケモン",
                "first_air_date": "1997-04-01",
                "overview": "Join Ash.",
                "number_of_seasons": 26,
                "number_of_episodes": 1270,
                "status": "Ended",
                "vote_average": 7.6,
                "vote_count": 1500,
                "genres": [{"id": 16, "name": "Animation"}],
                "external_ids": {"imdb_id": "tt0168366", "tvdb_id": 76703},
                "credits": {"cast": [{"name": "Rica Matsumoto", "character": "Satoshi", "order": 0}]}
            }"#,
        )
        .unwrap();

        let show = show_metadata(details);
        assert_eq!(show.tmdb_id, 60572);
        assert_eq!(show.year, Some(1997));
        assert_eq!(show.genres, vec!["Animation".to_string()]);
        assert_eq!(show.imdb_id.as_deref(), Some("tt0168366"));
        assert_eq!(show.cast[0].role.as_deref(), Some("Satoshi"));
        assert_eq!(show.poster_url, None);
    }

    #[test]
    fn test_year_of() {
        assert_eq!(year_of(Some("2016-11-17")), Some(2016));
        assert_eq!(year_of(Some("")), None);
        assert_eq!(year_of(None), None);
    }

    #[test]
    fn test_missing_api_key() {
        let config = config::TmdbConfig::default();
        assert!(matches!(
            TmdbConfig::from_config(&config),
            Err(crate::Error::TmdbApiKeyMissing)
        ));
    }
}
