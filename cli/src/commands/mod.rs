pub mod extract_images;
pub mod index;

use anyhow::Result;

use crate::cli::{Cli, Commands};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Index {
            content_dir,
            categories,
            output,
            root,
            default_author,
        } => {
            let options = index::IndexOptions {
                content_dir,
                categories,
                output,
                root,
                default_author,
            };
            index::run(&options).map(|_| ())
        },
        Commands::ExtractImages {
            content_dir,
            images_dir,
            url_prefix,
            dry_run,
        } => {
            let options = extract_images::ExtractOptions {
                content_dir,
                images_dir,
                url_prefix,
                dry_run,
            };
            extract_images::run(&options).map(|_| ())
        },
    }
}
