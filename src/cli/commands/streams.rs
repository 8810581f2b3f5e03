use anyhow::Context;
use std::sync::Arc;

use super::{print_json, resolve_source};
use crate::sources::Source;

pub async fn cmd_streams(
    sources: &[Arc<dyn Source>],
    source_id: &str,
    episode_id: &str,
    url: &str,
    json: bool,
) -> anyhow::Result<()> {
    let source = resolve_source(sources, source_id)?;
    let bundle = source
        .episode_streams(episode_id, url)
        .await
        .with_context(|| format!("Failed to resolve streams for '{episode_id}'"))?;

    if json {
        return print_json(&bundle);
    }

    println!("Streams ({} found, best first)", bundle.streams.len());
    println!("{:-<60}", "");
    for (index, stream) in bundle.streams.iter().enumerate() {
        println!("{}. [{}] {} {}", index + 1, stream.stream_type, stream.quality, stream.url);
    }

    if !bundle.subtitles.is_empty() {
        println!();
        println!("Subtitles:");
        for subtitle in &bundle.subtitles {
            let label = subtitle.label.as_deref().unwrap_or(&subtitle.language);
            println!("• {label}: {}", subtitle.url);
        }
    }

    Ok(())
}
