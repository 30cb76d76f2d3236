pub mod summary;
pub mod summary_output;
pub mod table;
pub mod utils;
pub mod views;

use clap::{Subcommand, ValueEnum};
use song_stats::{Pipeline, ViewName};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy)]
pub enum TableKind {
    /// Artists grouped by the year they first appear
    NewArtists,
    /// Albums grouped by the year they first appear
    Albums,
}

impl TableKind {
    pub fn view(self) -> ViewName {
        match self {
            TableKind::NewArtists => ViewName::NewArtistsTable,
            TableKind::Albums => ViewName::AlbumsTable,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute views and print them as JSON
    ///
    /// Chart views are printed as arrays of {x, y} points, table views as
    /// objects mapping a year to its members.
    ///
    /// Usage examples:
    /// # All views
    /// song-stats views dump.json
    ///
    /// # Only the decade chart and the new artists table, indented
    /// song-stats views dump.json --view songs-by-decade --view new-artists-table --pretty
    Views {
        /// Path to the JSON dump
        dump: PathBuf,

        /// Restrict output to these views (repeatable)
        #[arg(long = "view")]
        views: Vec<ViewName>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Summarize a dump as JSON-lines events
    ///
    /// Reports how many records were loaded and kept, and the size of every view.
    ///
    /// Usage examples:
    /// song-stats summary dump.json
    Summary {
        /// Path to the JSON dump
        dump: PathBuf,
    },

    /// Print a grouping table as text
    ///
    /// One line per year: the year followed by its members.
    ///
    /// Usage examples:
    /// song-stats table dump.json new-artists
    Table {
        /// Path to the JSON dump
        dump: PathBuf,

        /// Which table to print
        #[arg(value_enum)]
        kind: TableKind,
    },
}

/// Execute the appropriate command handler based on the parsed command
pub fn execute_command(
    command: Commands,
    pipeline: &Pipeline,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Views {
            dump,
            views,
            pretty,
        } => views::handle_views_command(pipeline, &dump, &views, pretty),

        Commands::Summary { dump } => summary::handle_summary_command(pipeline, &dump),

        Commands::Table { dump, kind } => table::handle_table_command(pipeline, &dump, kind),
    }
}
