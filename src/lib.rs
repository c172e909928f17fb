//! site-assets library for converting static site images to WebP.
//!
//! The core workflow runs once per candidate image, in a fixed order:
//!
//! 1. **Matching**: select `.jpg`/`.jpeg`/`.png` files under the image root,
//!    skipping excluded directories
//! 2. **Transcoding**: write a sibling `.webp` file
//! 3. **Rewriting**: replace the old relative path with the new one across
//!    content, data, and the site config
//! 4. **Cleanup**: delete the original once nothing points at it
//!
//! # Example
//!
//! ```no_run
//! use site_assets::{Pipeline, SiteLayout, WebpTranscoder};
//! use site_assets::report::ConsoleReporter;
//!
//! let layout = SiteLayout::new(".").with_excludes(["teams"]);
//! let tally = Pipeline::new(&layout, WebpTranscoder).run(&mut ConsoleReporter::default());
//!
//! println!("Converted {} images", tally.images_processed);
//! ```

pub mod config;
pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod report;
pub mod rewriter;
pub mod scanner;
pub mod transcode;
pub mod validate;

// Re-export commonly used types at crate root
pub use config::{CorpusRoot, SiteLayout};
pub use error::{AssetError, AssetResult};
pub use pipeline::{Pipeline, RunTally};
pub use rewriter::ReferencePathPair;
pub use scanner::AssetFile;
pub use transcode::{Transcoder, WebpTranscoder};
pub use validate::ValidationReport;
