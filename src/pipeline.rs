//! Run orchestration.
//!
//! For every candidate image the order is fixed: convert, rewrite references,
//! then delete the original. A reference therefore always names a file that
//! exists: the original before deletion, the converted file after. Every
//! failure is confined to the file it happened on.

use crate::config::{CorpusRoot, SiteLayout};
use crate::error::AssetError;
use crate::report::{PipelineEvent, Reporter};
use crate::rewriter::{self, ReferencePathPair};
use crate::scanner::{self, AssetFile};
use crate::transcode::Transcoder;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Counters for a single run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunTally {
    /// Images converted, rewritten, and deleted.
    pub images_processed: usize,
    /// Text files modified, summed over all images.
    pub references_updated: usize,
    pub conversions_failed: usize,
    /// Images converted and rewritten whose original could not be removed.
    pub deletions_failed: usize,
}

pub struct Pipeline<'a, T> {
    layout: &'a SiteLayout,
    transcoder: T,
}

impl<'a, T: Transcoder> Pipeline<'a, T> {
    pub fn new(layout: &'a SiteLayout, transcoder: T) -> Self {
        Self { layout, transcoder }
    }

    /// Processes every candidate under the image root once.
    pub fn run(&self, reporter: &mut dyn Reporter) -> RunTally {
        let mut tally = RunTally::default();
        let image_root = self.layout.image_root.clone();

        if !image_root.is_dir() {
            reporter.report(PipelineEvent::ImageRootMissing { image_root });
            reporter.report(PipelineEvent::Finished { tally: tally.clone() });
            return tally;
        }

        reporter.report(PipelineEvent::Started { image_root });
        let roots = self.layout.corpus_roots();

        for candidate in scanner::collect_candidates(self.layout) {
            match candidate {
                Ok(asset) => self.process(&asset, &roots, &mut tally, reporter),
                Err(err) => reporter.report(PipelineEvent::WalkFailed {
                    message: err.to_string(),
                }),
            }
        }

        reporter.report(PipelineEvent::Finished { tally: tally.clone() });
        tally
    }

    fn process(
        &self,
        asset: &AssetFile,
        roots: &[CorpusRoot],
        tally: &mut RunTally,
        reporter: &mut dyn Reporter,
    ) {
        reporter.report(PipelineEvent::Processing {
            reference: asset.reference(),
        });

        let converted = match self.transcoder.transcode(asset) {
            Ok(converted) => converted,
            Err(err) => {
                tally.conversions_failed += 1;
                reporter.report(PipelineEvent::TranscodeFailed {
                    message: err.to_string(),
                });
                return;
            }
        };

        let pair = ReferencePathPair::for_conversion(asset, &converted);
        let outcome = rewriter::rewrite_references(roots, &pair);
        for file in &outcome.updated {
            reporter.report(PipelineEvent::ReferenceUpdated {
                file: site_relative(&self.layout.root, file),
            });
        }
        for err in outcome.errors {
            reporter.report(PipelineEvent::RewriteFailed {
                message: err.to_string(),
            });
        }
        let references = outcome.updated.len();
        tally.references_updated += references;

        match fs::remove_file(&asset.path) {
            Ok(()) => {
                tally.images_processed += 1;
                reporter.report(PipelineEvent::Converted { references });
            }
            Err(source) => {
                tally.deletions_failed += 1;
                let err = AssetError::Delete {
                    path: asset.path.clone(),
                    source,
                };
                reporter.report(PipelineEvent::DeleteFailed {
                    message: err.to_string(),
                });
            }
        }
    }
}

fn site_relative(root: &Path, file: &Path) -> PathBuf {
    file.strip_prefix(root).unwrap_or(file).to_path_buf()
}
