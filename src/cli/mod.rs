//! CLI module - Command-line front end for the built-in sources
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Haishin sources - browse and resolve video catalogs from the terminal
#[derive(Parser)]
#[command(name = "haishin-sources")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the built-in sources
    #[command(alias = "ls")]
    Sources,

    /// Search a source's catalog
    #[command(alias = "s")]
    Search {
        /// Source id (e.g. archiveorg-cartoons)
        source: String,
        /// Search query; empty browses everything
        query: Vec<String>,
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Show featured entries of one source, or of every source
    Featured {
        /// Source id
        source: Option<String>,
    },

    /// Show the latest entries of a source
    Latest {
        /// Source id
        source: String,
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Show the popular entries of a source
    Popular {
        /// Source id
        source: String,
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Resolve a catalog entry into its episodes
    #[command(alias = "i", alias = "info")]
    Details {
        /// Source id
        source: String,
        /// Entry id as returned by search
        id: String,
        /// Entry url as returned by search
        #[arg(long, default_value = "")]
        url: String,
    },

    /// Resolve an episode into playable streams
    Streams {
        /// Source id
        source: String,
        /// Episode id as returned by details
        episode_id: String,
        /// Episode url as returned by details
        #[arg(long, default_value = "")]
        url: String,
    },

    /// Create default config file
    Init,
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_with_globals() {
        let cli = Cli::parse_from([
            "haishin-sources",
            "search",
            "archiveorg-cartoons",
            "betty",
            "boop",
            "--page",
            "2",
            "--json",
        ]);

        assert!(cli.json);
        match cli.command {
            Some(Commands::Search {
                source,
                query,
                page,
            }) => {
                assert_eq!(source, "archiveorg-cartoons");
                assert_eq!(query.join(" "), "betty boop");
                assert_eq!(page, 2);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_parse_details_url() {
        let cli = Cli::parse_from([
            "haishin-sources",
            "details",
            "archiveorg-cartoons",
            "betty-boop",
            "--url",
            "series:Betty Boop",
        ]);

        match cli.command {
            Some(Commands::Details { id, url, .. }) => {
                assert_eq!(id, "betty-boop");
                assert_eq!(url, "series:Betty Boop");
            }
            _ => panic!("expected details"),
        }
    }
}
