use std::sync::Arc;

use super::{print_entries, print_json, resolve_source};
use crate::models::SearchPage;
use crate::sources::Source;

pub async fn cmd_search(
    sources: &[Arc<dyn Source>],
    source_id: &str,
    query: &str,
    page: u32,
    json: bool,
) -> anyhow::Result<()> {
    let source = resolve_source(sources, source_id)?;
    let results = source.search(query, page).await;

    if json {
        return print_json(&results);
    }

    if query.is_empty() {
        println!("Browsing {} (page {page})", source.metadata().name);
    } else {
        println!("Searching {} for: {query} (page {page})", source.metadata().name);
    }
    print_page(&results, page);

    Ok(())
}

pub async fn cmd_featured(
    sources: &[Arc<dyn Source>],
    source_id: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let selected = match source_id {
        Some(id) => vec![resolve_source(sources, id)?],
        None => sources.to_vec(),
    };

    let mut all = Vec::new();
    for source in &selected {
        let entries = source.featured().await;
        all.push((source.metadata().id, entries));
    }

    if json {
        let map: std::collections::BTreeMap<_, _> = all.into_iter().collect();
        return print_json(&map);
    }

    for (id, entries) in &all {
        println!("Featured from {id} ({} entries)", entries.len());
        println!("{:-<60}", "");
        if entries.is_empty() {
            println!("Nothing featured.");
            println!();
        }
        print_entries(entries);
    }

    Ok(())
}

pub async fn cmd_latest(
    sources: &[Arc<dyn Source>],
    source_id: &str,
    page: u32,
    json: bool,
) -> anyhow::Result<()> {
    let source = resolve_source(sources, source_id)?;
    let results = source.latest(page).await;

    if json {
        return print_json(&results);
    }

    println!("Latest from {} (page {page})", source.metadata().name);
    print_page(&results, page);
    Ok(())
}

pub async fn cmd_popular(
    sources: &[Arc<dyn Source>],
    source_id: &str,
    page: u32,
    json: bool,
) -> anyhow::Result<()> {
    let source = resolve_source(sources, source_id)?;
    let results = source.popular(page).await;

    if json {
        return print_json(&results);
    }

    println!("Popular on {} (page {page})", source.metadata().name);
    print_page(&results, page);
    Ok(())
}

fn print_page(results: &SearchPage, page: u32) {
    println!("{:-<60}", "");

    if results.is_empty() {
        println!("No results.");
        return;
    }

    print_entries(&results.results);

    if results.has_next_page {
        println!("More results: --page {}", page.max(1) + 1);
    }
}
