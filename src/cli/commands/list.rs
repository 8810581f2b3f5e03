//! List sources command handler

use std::sync::Arc;

use super::print_json;
use crate::sources::Source;

pub fn cmd_sources(sources: &[Arc<dyn Source>], json: bool) -> anyhow::Result<()> {
    if json {
        let metadata: Vec<_> = sources.iter().map(|s| s.metadata()).collect();
        return print_json(&metadata);
    }

    println!("Available Sources ({} total)", sources.len());
    println!("{:-<70}", "");

    for source in sources {
        let meta = source.metadata();
        println!("• {} v{} [{}]", meta.name, meta.version, meta.id);
        println!("  {}", meta.description);
        println!(
            "  Base: {} | Language: {} | NSFW: {}",
            meta.base_url, meta.language, meta.nsfw
        );
    }

    Ok(())
}
