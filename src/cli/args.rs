//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Media Files Organizer - Rename TV episodes and catalog Portuguese dub casts
#[derive(Parser, Debug)]
#[command(name = "media-files-organizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// Catalog database path (overrides DB_PATH and the config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rename a season's episodes and write NFO sidecars
    Organize {
        /// TMDB id of the show
        #[arg(value_name = "TMDB_ID")]
        tmdb_id: u64,

        /// Season directory (default: current directory)
        #[arg(value_name = "DIR", default_value = ".")]
        directory: PathBuf,

        /// Treat the directory as a TV show season (required)
        #[arg(short = 't', long)]
        tvshow: bool,

        /// Season number (inferred from file names when omitted)
        #[arg(short, long)]
        season: Option<u16>,

        /// Season display name written to season.nfo
        #[arg(long, value_name = "NAME")]
        season_name: Option<String>,

        /// Only write NFO files, keep file names
        #[arg(short = 'n', long)]
        nfo_only: bool,

        /// Dry run - show the rename plan without changing anything
        #[arg(long)]
        dry_run: bool,

        /// Text prepended to the series name of every file
        #[arg(long)]
        prefix: Option<String>,

        /// Also write tvshow.nfo in the parent directory
        #[arg(long)]
        show_nfo: bool,

        /// Also download poster.jpg
        #[arg(long)]
        poster: bool,
    },

    /// Manage catalogued seasons
    Season {
        #[command(subcommand)]
        action: SeasonAction,
    },

    /// Manage catalogued people
    Person {
        #[command(subcommand)]
        action: PersonAction,
    },

    /// Manage catalogued shows
    Show {
        #[command(subcommand)]
        action: ShowAction,
    },

    /// Create the catalog database
    InitDb,
}

#[derive(Subcommand, Debug)]
pub enum SeasonAction {
    /// Scrape a season's dub cast from the dubbing wiki
    Scrape {
        /// Season page URL
        #[arg(value_name = "URL")]
        url: String,

        /// Catalog id of the show
        #[arg(value_name = "SHOW_ID")]
        show_id: i64,

        /// Season number
        #[arg(value_name = "SEASON_NUM")]
        season_number: i32,

        /// Display name (default: "Season <n>")
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },

    /// List the seasons of a show
    List {
        /// Catalog id of the show
        #[arg(value_name = "SHOW_ID")]
        show_id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum PersonAction {
    /// Scrape a person page from the dubbing wiki
    Scrape {
        /// Person page URL
        #[arg(value_name = "URL")]
        url: String,
    },

    /// List catalogued people
    List,
}

#[derive(Subcommand, Debug)]
pub enum ShowAction {
    /// Add or update a show, filling missing fields from TMDB
    Add {
        /// TMDB id of the show
        #[arg(value_name = "TMDB_ID")]
        tmdb_id: u64,

        /// Title
        #[arg(long)]
        title: Option<String>,

        /// Original title
        #[arg(long)]
        original_title: Option<String>,

        /// First air year
        #[arg(long)]
        year: Option<i32>,

        /// Plot summary
        #[arg(long)]
        plot: Option<String>,

        /// Content rating (e.g. TV-Y)
        #[arg(long)]
        mpaa: Option<String>,

        /// Do not contact TMDB; requires --title
        #[arg(long)]
        offline: bool,
    },

    /// List catalogued shows
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_organize_args() {
        let cli = Cli::try_parse_from([
            "media-files-organizer",
            "organize",
            "60572",
            "/tv/Pokemon/Season 01",
            "-t",
            "-s",
            "1",
            "-n",
        ])
        .unwrap();
        match cli.command {
            Commands::Organize {
                tmdb_id,
                tvshow,
                season,
                nfo_only,
                directory,
                ..
            } => {
                assert_eq!(tmdb_id, 60572);
                assert!(tvshow);
                assert_eq!(season, Some(1));
                assert!(nfo_only);
                assert_eq!(directory, PathBuf::from("/tv/Pokemon/Season 01"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_show_add_rejects_negative_id() {
        let result = Cli::try_parse_from(["media-files-organizer", "show", "add", "-5", "--offline"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["media-files-organizer", "show", "add", "60572"]).unwrap();
        match cli.command {
            Commands::Show {
                action: ShowAction::Add { tmdb_id, .. },
            } => assert_eq!(tmdb_id, 60572),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_season_scrape_args() {
        let cli = Cli::try_parse_from([
            "media-files-organizer",
            "--db",
            "/tmp/c.sqlite3",
            "season",
            "scrape",
            "https://wikidobragens.fandom.com/pt/wiki/Pokémon",
            "1",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/c.sqlite3")));
        match cli.command {
            Commands::Season {
                action:
                    SeasonAction::Scrape {
                        show_id,
                        season_number,
                        name,
                        ..
                    },
            } => {
                assert_eq!(show_id, 1);
                assert_eq!(season_number, 5);
                assert_eq!(name, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
