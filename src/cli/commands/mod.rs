mod info;
mod init;
mod list;
mod search;
mod streams;

pub use info::cmd_details;
pub use init::cmd_init;
pub use list::cmd_sources;
pub use search::{cmd_featured, cmd_latest, cmd_popular, cmd_search};
pub use streams::cmd_streams;

use anyhow::Context;
use serde::Serialize;
use std::sync::Arc;

use crate::models::CatalogEntry;
use crate::sources::{Source, find_source};

fn resolve_source(sources: &[Arc<dyn Source>], id: &str) -> anyhow::Result<Arc<dyn Source>> {
    find_source(sources, id).with_context(|| {
        let known: Vec<&str> = sources.iter().map(|s| s.metadata().id).collect();
        format!("Unknown source '{id}'. Available: {}", known.join(", "))
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_entries(entries: &[CatalogEntry]) {
    for entry in entries {
        println!("• {}", entry.title);
        println!("  ID: {} | URL: {}", entry.id, entry.url);
        if let Some(cover) = &entry.cover_url {
            println!("  Cover: {cover}");
        }
        println!();
    }
}
