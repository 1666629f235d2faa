//! NFO file generator (Kodi compatible).

use crate::models::media::{
    Credit, EpisodeMetadata, SeasonMetadata, StreamDetails, TvShowMetadata,
};
use chrono::{Datelike, NaiveDate};

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

/// Generate episode NFO content.
///
/// `cast` replaces the show cast in the `<actor>` list; guest stars are
/// always taken from the episode.
pub fn generate_episode_nfo(
    show: &TvShowMetadata,
    episode: &EpisodeMetadata,
    cast: &[Credit],
    streams: Option<&StreamDetails>,
) -> String {
    let mut nfo = String::new();

    nfo.push_str(XML_HEADER);
    nfo.push_str("<episodedetails>\n");

    nfo.push_str(&format!("  <title>{}</title>\n", escape_xml(&episode.name)));
    nfo.push_str(&format!(
        "  <showtitle>{}</showtitle>\n",
        escape_xml(&show.name)
    ));
    nfo.push_str(&format!("  <season>{:02}</season>\n", episode.season_number));
    nfo.push_str(&format!("  <episode>{:02}</episode>\n", episode.episode_number));

    let (aired, year) = split_date(episode.air_date.as_deref());
    nfo.push_str(&format!("  <aired>{}</aired>\n", escape_xml(&aired)));
    nfo.push_str(&format!("  <year>{}</year>\n", year));

    if let Some(ref overview) = episode.overview {
        nfo.push_str(&format!("  <plot>{}</plot>\n", escape_xml(overview)));
    }
    push_rating(&mut nfo, episode.rating, None);

    nfo.push_str(&format!(
        "  <uniqueid type=\"tmdb\" default=\"true\">{}</uniqueid>\n",
        show.tmdb_id
    ));

    for genre in &show.genres {
        nfo.push_str(&format!("  <genre>{}</genre>\n", escape_xml(genre)));
    }

    for member in &episode.crew {
        match member.kind.as_str() {
            "Director" => {
                nfo.push_str(&format!("  <director>{}</director>\n", escape_xml(&member.name)))
            }
            "Writer" | "Screenplay" | "Story" => {
                nfo.push_str(&format!("  <credits>{}</credits>\n", escape_xml(&member.name)))
            }
            _ => {}
        }
    }

    push_actors(&mut nfo, cast);
    push_actors(&mut nfo, &episode.guest_stars);

    if let Some(ref still) = episode.still_url {
        nfo.push_str(&format!("  <thumb>{}</thumb>\n", escape_xml(still)));
    }

    if let Some(streams) = streams {
        push_stream_details(&mut nfo, streams);
    }

    nfo.push_str("</episodedetails>\n");
    nfo
}

/// Generate season NFO content.
pub fn generate_season_nfo(
    show: &TvShowMetadata,
    season: &SeasonMetadata,
    title: &str,
    cast: &[Credit],
    date_added: NaiveDate,
) -> String {
    let mut nfo = String::new();

    nfo.push_str(XML_HEADER);
    nfo.push_str("<season>\n");

    nfo.push_str(&format!("  <title>{}</title>\n", escape_xml(title)));
    nfo.push_str(&format!(
        "  <showtitle>{}</showtitle>\n",
        escape_xml(&show.name)
    ));
    nfo.push_str(&format!(
        "  <seasonnumber>{}</seasonnumber>\n",
        season.season_number
    ));

    let (premiered, year) = split_date(season.air_date.as_deref());
    nfo.push_str(&format!("  <year>{}</year>\n", year));
    nfo.push_str(&format!("  <premiered>{}</premiered>\n", escape_xml(&premiered)));
    nfo.push_str(&format!(
        "  <releasedate>{}</releasedate>\n",
        escape_xml(&premiered)
    ));

    if let Some(ref overview) = season.overview {
        nfo.push_str(&format!("  <plot>{}</plot>\n", escape_xml(overview)));
    }
    push_rating(&mut nfo, season.rating, None);

    nfo.push_str(&format!(
        "  <dateadded>{}</dateadded>\n",
        date_added.format("%Y-%m-%d")
    ));

    for genre in &show.genres {
        nfo.push_str(&format!("  <genre>{}</genre>\n", escape_xml(genre)));
    }

    push_actors(&mut nfo, cast);

    if let Some(ref poster) = season.poster_url {
        nfo.push_str(&format!(
            "  <thumb aspect=\"poster\">{}</thumb>\n",
            escape_xml(poster)
        ));
    }

    nfo.push_str("</season>\n");
    nfo
}

/// Generate TV show NFO content.
pub fn generate_tvshow_nfo(show: &TvShowMetadata, cast: &[Credit]) -> String {
    let mut nfo = String::new();

    nfo.push_str(XML_HEADER);
    nfo.push_str("<tvshow>\n");

    nfo.push_str(&format!("  <title>{}</title>\n", escape_xml(&show.name)));
    nfo.push_str(&format!(
        "  <originaltitle>{}</originaltitle>\n",
        escape_xml(&show.original_name)
    ));

    let (premiered, year) = split_date(show.first_air_date.as_deref());
    nfo.push_str(&format!("  <year>{}</year>\n", year));
    nfo.push_str(&format!("  <premiered>{}</premiered>\n", escape_xml(&premiered)));

    if let Some(ref status) = show.status {
        nfo.push_str(&format!("  <status>{}</status>\n", escape_xml(status)));
    }
    nfo.push_str(&format!("  <season>{}</season>\n", show.number_of_seasons));
    nfo.push_str(&format!("  <episode>{}</episode>\n", show.number_of_episodes));

    push_rating(&mut nfo, show.rating, show.votes);

    nfo.push_str(&format!(
        "  <uniqueid type=\"tmdb\" default=\"true\">{}</uniqueid>\n",
        show.tmdb_id
    ));
    if let Some(ref imdb_id) = show.imdb_id {
        nfo.push_str(&format!(
            "  <uniqueid type=\"imdb\">{}</uniqueid>\n",
            escape_xml(imdb_id)
        ));
    }
    if let Some(tvdb_id) = show.tvdb_id {
        nfo.push_str(&format!("  <uniqueid type=\"tvdb\">{}</uniqueid>\n", tvdb_id));
    }

    if let Some(ref overview) = show.overview {
        nfo.push_str(&format!("  <plot>{}</plot>\n", escape_xml(overview)));
    }

    for genre in &show.genres {
        nfo.push_str(&format!("  <genre>{}</genre>\n", escape_xml(genre)));
    }

    push_actors(&mut nfo, cast);

    if let Some(ref poster) = show.poster_url {
        nfo.push_str(&format!(
            "  <thumb aspect=\"poster\">{}</thumb>\n",
            escape_xml(poster)
        ));
    }
    if let Some(ref backdrop) = show.backdrop_url {
        nfo.push_str("  <fanart>\n");
        nfo.push_str(&format!("    <thumb>{}</thumb>\n", escape_xml(backdrop)));
        nfo.push_str("  </fanart>\n");
    }

    nfo.push_str("</tvshow>\n");
    nfo
}

fn push_rating(nfo: &mut String, rating: Option<f32>, votes: Option<u32>) {
    let Some(rating) = rating else {
        return;
    };
    nfo.push_str("  <ratings>\n");
    nfo.push_str("    <rating name=\"tmdb\" max=\"10\" default=\"true\">\n");
    nfo.push_str(&format!("      <value>{:.1}</value>\n", rating));
    if let Some(votes) = votes {
        nfo.push_str(&format!("      <votes>{}</votes>\n", votes));
    }
    nfo.push_str("    </rating>\n");
    nfo.push_str("  </ratings>\n");
}

fn push_actors(nfo: &mut String, credits: &[Credit]) {
    for (i, actor) in credits.iter().enumerate() {
        nfo.push_str("  <actor>\n");
        nfo.push_str(&format!("    <name>{}</name>\n", escape_xml(&actor.name)));
        if let Some(ref role) = actor.role {
            nfo.push_str(&format!("    <role>{}</role>\n", escape_xml(role)));
        }
        nfo.push_str(&format!("    <type>{}</type>\n", escape_xml(&actor.kind)));
        if let Some(ref photo) = actor.photo {
            nfo.push_str(&format!("    <thumb>{}</thumb>\n", escape_xml(photo)));
        }
        nfo.push_str(&format!(
            "    <order>{}</order>\n",
            actor.order.unwrap_or(i as u32)
        ));
        nfo.push_str("  </actor>\n");
    }
}

fn push_stream_details(nfo: &mut String, streams: &StreamDetails) {
    nfo.push_str("  <fileinfo>\n");
    nfo.push_str("    <streamdetails>\n");

    if let Some(ref video) = streams.video {
        nfo.push_str("      <video>\n");
        nfo.push_str(&format!("        <codec>{}</codec>\n", escape_xml(&video.codec)));
        nfo.push_str(&format!(
            "        <micodec>{}</micodec>\n",
            escape_xml(&video.micodec)
        ));
        if let Some(bitrate) = video.bitrate {
            nfo.push_str(&format!("        <bitrate>{}</bitrate>\n", bitrate));
        }
        if let Some(width) = video.width {
            nfo.push_str(&format!("        <width>{}</width>\n", width));
        }
        if let Some(height) = video.height {
            nfo.push_str(&format!("        <height>{}</height>\n", height));
        }
        if let Some(ref aspect) = video.aspect {
            nfo.push_str(&format!("        <aspect>{}</aspect>\n", escape_xml(aspect)));
        }
        if let Some(ratio) = video.aspect_ratio {
            nfo.push_str(&format!("        <aspectratio>{}</aspectratio>\n", ratio));
        }
        if let Some(framerate) = video.framerate {
            nfo.push_str(&format!("        <framerate>{}</framerate>\n", framerate));
        }
        nfo.push_str(&format!(
            "        <scantype>{}</scantype>\n",
            escape_xml(&video.scan_type)
        ));
        nfo.push_str(&format!("        <default>{}</default>\n", video.default));
        nfo.push_str(&format!("        <forced>{}</forced>\n", video.forced));
        if let Some(seconds) = video.duration_seconds {
            nfo.push_str(&format!(
                "        <durationinseconds>{}</durationinseconds>\n",
                seconds
            ));
        }
        if let Some(duration) = video.duration_display() {
            nfo.push_str(&format!("        <duration>{}</duration>\n", duration));
        }
        nfo.push_str("      </video>\n");
    }

    for audio in &streams.audio {
        nfo.push_str("      <audio>\n");
        nfo.push_str(&format!("        <codec>{}</codec>\n", escape_xml(&audio.codec)));
        nfo.push_str(&format!(
            "        <micodec>{}</micodec>\n",
            escape_xml(&audio.micodec)
        ));
        if let Some(bitrate) = audio.bitrate {
            nfo.push_str(&format!("        <bitrate>{}</bitrate>\n", bitrate));
        }
        nfo.push_str(&format!(
            "        <language>{}</language>\n",
            escape_xml(&audio.language)
        ));
        if let Some(channels) = audio.channels {
            nfo.push_str(&format!("        <channels>{}</channels>\n", channels));
        }
        if let Some(rate) = audio.sampling_rate {
            nfo.push_str(&format!("        <samplingrate>{}</samplingrate>\n", rate));
        }
        nfo.push_str(&format!("        <default>{}</default>\n", audio.default));
        nfo.push_str(&format!("        <forced>{}</forced>\n", audio.forced));
        nfo.push_str("      </audio>\n");
    }

    for language in &streams.subtitles {
        nfo.push_str("      <subtitle>\n");
        nfo.push_str(&format!(
            "        <language>{}</language>\n",
            escape_xml(language)
        ));
        nfo.push_str("      </subtitle>\n");
    }

    nfo.push_str("    </streamdetails>\n");
    nfo.push_str("  </fileinfo>\n");
}

/// Split a `YYYY-MM-DD` date into the date and its year.
///
/// Anything else is returned verbatim with an empty year.
pub fn split_date(date: Option<&str>) -> (String, String) {
    let Some(date) = date else {
        return (String::new(), String::new());
    };
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => (
            parsed.format("%Y-%m-%d").to_string(),
            parsed.year().to_string(),
        ),
        Err(_) => (date.to_string(), String::new()),
    }
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
