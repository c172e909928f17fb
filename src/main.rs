//! site-assets: convert static site images to WebP and fix every reference.
//!
//! Walks the image root, converts each JPEG/PNG to a sibling WebP file,
//! rewrites the old relative path across content, data, and the site config,
//! then deletes the original.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Commands, LayoutArgs};
use colored::Colorize;
use site_assets::report::ConsoleReporter;
use site_assets::{Pipeline, SiteLayout, ValidationReport, WebpTranscoder, scanner, validate};
use std::path::Path;

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Optimize { layout, json } => cmd_optimize(layout.into_layout(), json),
        Commands::Scan { layout } => cmd_scan(layout),
        Commands::Validate { site_root, json } => cmd_validate(&site_root, json),
    }
}

fn cmd_optimize(layout: SiteLayout, json_output: bool) -> Result<()> {
    let mut reporter = ConsoleReporter {
        quiet_summary: json_output,
    };
    let tally = Pipeline::new(&layout, WebpTranscoder).run(&mut reporter);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&tally)?);
    }

    // Per-file failures are already logged; a run never fails as a whole.
    Ok(())
}

fn cmd_scan(layout: LayoutArgs) -> Result<()> {
    let layout = layout.into_layout();
    if !layout.image_root.is_dir() {
        println!(
            "{} Image directory {} not found",
            "warn:".yellow().bold(),
            layout.image_root.display()
        );
        return Ok(());
    }

    let mut count = 0;
    for candidate in scanner::collect_candidates(&layout) {
        match candidate {
            Ok(asset) => {
                println!("  {}", asset.reference());
                count += 1;
            }
            Err(err) => eprintln!("{} {}", "warn:".yellow().bold(), err),
        }
    }
    println!("\nWould convert {} image(s)", count);

    Ok(())
}

fn cmd_validate(site_root: &Path, json_output: bool) -> Result<()> {
    let report = validate::validate_site(site_root);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_validation_report(&report);
    }

    if !report.is_ok() {
        anyhow::bail!("validation failed with {} error(s)", report.errors.len());
    }
    Ok(())
}

fn print_validation_report(report: &ValidationReport) {
    for file in &report.passed {
        println!("  {} {}", "ok:".green().bold(), file.display());
    }

    if !report.errors.is_empty() {
        println!(
            "\n{} {} error(s):",
            "Found".red().bold(),
            report.errors.len()
        );
        for error in &report.errors {
            println!("  {} {}", "-".red(), error);
        }
    }

    if !report.warnings.is_empty() {
        println!(
            "\n{} {} warning(s):",
            "Found".yellow().bold(),
            report.warnings.len()
        );
        for warning in &report.warnings {
            println!("  {} {}", "-".yellow(), warning);
        }
    }

    if report.errors.is_empty() && report.warnings.is_empty() {
        println!("\n{} All validations passed", "ok:".green().bold());
    } else if report.errors.is_empty() {
        println!("\n{} No errors found (only warnings)", "ok:".green().bold());
    }
}
