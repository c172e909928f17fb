//! Command-line interface definitions.
//!
//! Defines the argument parser and subcommands using clap's derive API.
//! Each subcommand corresponds to a distinct operation: converting images and
//! fixing their references, listing conversion candidates, or validating the
//! site's data files.

use clap::{Args as ClapArgs, Parser, Subcommand};
use site_assets::SiteLayout;
use std::path::PathBuf;

/// Convert static site images to WebP and keep every reference to them valid.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert images, rewrite references to them, and delete the originals.
    Optimize {
        #[command(flatten)]
        layout: LayoutArgs,

        /// Print the final tally as JSON instead of the text summary.
        #[arg(long)]
        json: bool,
    },

    /// List images that would be converted without touching anything.
    Scan {
        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Check the alumni roster and page front matter.
    Validate {
        /// Site root directory.
        #[arg(long, default_value = ".")]
        site_root: PathBuf,

        /// Emit JSON instead of human-readable output.
        #[arg(long)]
        json: bool,
    },
}

/// Where the site keeps its images and text. Paths are relative to the site root.
#[derive(Debug, ClapArgs)]
pub struct LayoutArgs {
    /// Site root directory.
    #[arg(long, default_value = ".")]
    pub site_root: PathBuf,

    /// Image directory.
    #[arg(long, default_value = site_assets::config::DEFAULT_IMAGES_DIR)]
    pub images: PathBuf,

    /// Page content directory.
    #[arg(long, default_value = site_assets::config::DEFAULT_CONTENT_DIR)]
    pub content: PathBuf,

    /// Structured data directory.
    #[arg(long, default_value = site_assets::config::DEFAULT_DATA_DIR)]
    pub data: PathBuf,

    /// Site configuration file.
    #[arg(long, default_value = site_assets::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directories under the image root to leave alone. Defaults to `teams`.
    #[arg(short, long)]
    pub exclude: Vec<PathBuf>,
}

impl LayoutArgs {
    pub fn into_layout(self) -> SiteLayout {
        let layout = SiteLayout::new(self.site_root)
            .with_image_root(self.images)
            .with_content_dir(self.content)
            .with_data_dir(self.data)
            .with_config_file(self.config);
        if self.exclude.is_empty() {
            layout
        } else {
            layout.with_excludes(self.exclude)
        }
    }
}
