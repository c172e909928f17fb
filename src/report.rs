//! Progress reporting.
//!
//! The pipeline never prints. It emits [`PipelineEvent`]s to a [`Reporter`],
//! and the binary plugs in [`ConsoleReporter`] for the colored progress log.

use crate::pipeline::RunTally;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    Started { image_root: PathBuf },
    ImageRootMissing { image_root: PathBuf },
    /// A candidate is about to be converted; carries its relative reference.
    Processing { reference: String },
    TranscodeFailed { message: String },
    /// A text file now points at the converted image. Path is site-relative.
    ReferenceUpdated { file: PathBuf },
    RewriteFailed { message: String },
    /// The original was deleted after `references` files were rewritten.
    Converted { references: usize },
    DeleteFailed { message: String },
    WalkFailed { message: String },
    Finished { tally: RunTally },
}

pub trait Reporter {
    fn report(&mut self, event: PipelineEvent);
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _event: PipelineEvent) {}
}

/// Keeps every event in order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<PipelineEvent>,
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: PipelineEvent) {
        self.events.push(event);
    }
}

/// Human-readable progress log on stdout.
///
/// With `quiet_summary` the closing summary line is left to the caller, which
/// `--json` uses to print the tally instead.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    pub quiet_summary: bool,
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::Started { image_root } => println!(
                "{} Optimizing images under {}",
                "info:".blue().bold(),
                image_root.display()
            ),
            PipelineEvent::ImageRootMissing { image_root } => println!(
                "{} Image directory {} not found, nothing to do",
                "warn:".yellow().bold(),
                image_root.display()
            ),
            PipelineEvent::Processing { reference } => {
                println!("\n{} {}", "Processing:".yellow().bold(), reference)
            }
            PipelineEvent::TranscodeFailed { message } => {
                println!("    {} {}", "error:".red().bold(), message)
            }
            PipelineEvent::ReferenceUpdated { file } => {
                println!("    {} {}", "updated:".dimmed(), file.display())
            }
            PipelineEvent::RewriteFailed { message } => {
                println!("    {} {}", "warn:".yellow().bold(), message)
            }
            PipelineEvent::Converted { references } => println!(
                "    {} Converted and deleted original ({} refs updated)",
                "ok:".green().bold(),
                references
            ),
            PipelineEvent::DeleteFailed { message } => {
                println!("    {} {}", "error:".red().bold(), message)
            }
            PipelineEvent::WalkFailed { message } => {
                println!("{} {}", "warn:".yellow().bold(), message)
            }
            PipelineEvent::Finished { tally } => {
                if !self.quiet_summary {
                    println!("\n{} {}", "done:".green().bold(), render_summary(&tally));
                }
            }
        }
    }
}

/// One-line plain-text summary of a run.
pub fn render_summary(tally: &RunTally) -> String {
    let mut summary = format!(
        "Processed {} image(s), updated {} reference file(s)",
        tally.images_processed, tally.references_updated
    );
    if tally.conversions_failed > 0 {
        summary.push_str(&format!(", {} conversion(s) failed", tally.conversions_failed));
    }
    if tally.deletions_failed > 0 {
        summary.push_str(&format!(", {} deletion(s) failed", tally.deletions_failed));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_for_clean_run() {
        let tally = RunTally {
            images_processed: 3,
            references_updated: 5,
            ..RunTally::default()
        };
        insta::assert_snapshot!(render_summary(&tally), @"Processed 3 image(s), updated 5 reference file(s)");
    }

    #[test]
    fn summary_mentions_failures() {
        let tally = RunTally {
            images_processed: 1,
            references_updated: 0,
            conversions_failed: 2,
            deletions_failed: 1,
        };
        insta::assert_snapshot!(
            render_summary(&tally),
            @"Processed 1 image(s), updated 0 reference file(s), 2 conversion(s) failed, 1 deletion(s) failed"
        );
    }

    #[test]
    fn recording_reporter_keeps_order() {
        let mut reporter = RecordingReporter::default();
        reporter.report(PipelineEvent::Processing {
            reference: "a.jpg".into(),
        });
        reporter.report(PipelineEvent::Converted { references: 0 });
        assert_eq!(
            reporter.events,
            vec![
                PipelineEvent::Processing {
                    reference: "a.jpg".into()
                },
                PipelineEvent::Converted { references: 0 },
            ]
        );
    }
}
