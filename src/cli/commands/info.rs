use anyhow::Context;
use std::sync::Arc;

use super::{print_json, resolve_source};
use crate::sources::Source;

pub async fn cmd_details(
    sources: &[Arc<dyn Source>],
    source_id: &str,
    id: &str,
    url: &str,
    json: bool,
) -> anyhow::Result<()> {
    let source = resolve_source(sources, source_id)?;
    let details = source
        .video_details(id, url)
        .await
        .with_context(|| format!("Failed to load details for '{id}'"))?;

    if json {
        return print_json(&details);
    }

    println!("Video Info");
    println!("{:-<60}", "");
    println!("Title:    {}", details.title);
    if let Some(en) = details.english_title.as_deref().filter(|en| *en != details.title) {
        println!("English:  {en}");
    }
    println!("ID:       {}", details.id);
    println!("Status:   {}", details.status);
    if let Some(creator) = &details.creator {
        println!("Creator:  {creator}");
    }
    if let Some(date) = &details.release_date {
        println!("Released: {date}");
    }
    if let Some(seconds) = details.duration_seconds {
        println!("Runtime:  {}m {}s", seconds / 60, seconds % 60);
    }
    if let Some(rating) = &details.rating {
        println!("Rating:   {rating}");
    }
    if !details.genres.is_empty() {
        let genres: Vec<&str> = details.genres.iter().map(String::as_str).collect();
        println!("Genres:   {}", genres.join(", "));
    }
    if !details.synopsis.is_empty() {
        println!();
        println!("{}", details.synopsis);
    }

    for (server_id, name) in details.servers() {
        let episodes = details.server_episodes(server_id);
        println!();
        println!("{name} ({} episodes)", episodes.len());
        println!("{:-<60}", "");
        for episode in episodes {
            println!("{:>4}. {}", episode.number, episode.title);
            println!("      ID: {} | URL: {}", episode.id, episode.url);
        }
    }

    Ok(())
}
