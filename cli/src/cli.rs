use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mdpress-cli", version, about = "mdpress content maintenance CLI")]
pub struct Cli {
    /// Also write daily-rolling log files into this directory.
    #[arg(long, global = true, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan markdown articles and regenerate the article index.
    Index {
        /// Directory holding the markdown articles.
        #[arg(long, default_value = "./content/articles")]
        content_dir: PathBuf,
        /// Category tree used to resolve category names to slugs.
        #[arg(long, default_value = "./data/categories.json")]
        categories: PathBuf,
        /// Article index to write; counters in an existing file are kept.
        #[arg(long, default_value = "./data/articles.json")]
        output: PathBuf,
        /// Site root that article `content` paths are made relative to.
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Author recorded for articles without an author line.
        #[arg(long, default_value = "admin")]
        default_author: String,
    },
    /// Move inlined base64 images out of markdown into image files.
    ExtractImages {
        /// Directory holding the markdown articles.
        #[arg(long, default_value = "./content/articles")]
        content_dir: PathBuf,
        /// Directory extracted images are written to.
        #[arg(long, default_value = "./content/assets/images")]
        images_dir: PathBuf,
        /// URL prefix used in rewritten image references.
        #[arg(long, default_value = "/content/assets/images")]
        url_prefix: String,
        /// Report what would change without writing anything.
        #[arg(long)]
        dry_run: bool,
    },
}
