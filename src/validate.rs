//! Read-only checks for the site's data files.
//!
//! Two kinds of files are checked: the alumni roster in `data/alumni.yaml`,
//! and the TOML front matter of event and ContriHub pages. Problems are
//! collected as messages prefixed with the site-relative path. Nothing is
//! ever written.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const ROSTER_FILE: &str = "data/alumni.yaml";
pub const EVENTS_DIR: &str = "content/events";
pub const CONTRIHUB_DIR: &str = "content/contrihub";

const ROSTER_REQUIRED: &[&str] = &["name", "batch", "graduation_year"];
const ROSTER_OPTIONAL: &[&str] = &[
    "linkedin",
    "github",
    "image",
    "current_role",
    "company",
    "domain",
    "location",
    "message",
    "degree",
    "branch",
    "current_position",
];
const EVENT_REQUIRED: &[&str] = &["title", "description", "date"];

/// Problems found in one file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Findings {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Findings {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    fn error(&mut self, label: &str, message: impl AsRef<str>) {
        self.errors.push(format!("{label}: {}", message.as_ref()));
    }

    fn warning(&mut self, label: &str, message: impl AsRef<str>) {
        self.warnings.push(format!("{label}: {}", message.as_ref()));
    }
}

/// Aggregate result of validating a site.
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Files that produced neither errors nor warnings.
    pub passed: Vec<PathBuf>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn absorb(&mut self, file: PathBuf, findings: Findings) {
        if findings.is_clean() {
            self.passed.push(file);
        }
        self.errors.extend(findings.errors);
        self.warnings.extend(findings.warnings);
    }
}

/// Validates the roster and page front matter of the site at `root`.
pub fn validate_site(root: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    let roster = root.join(ROSTER_FILE);
    if roster.is_file() {
        let findings = check_roster(&roster, &label(root, &roster));
        report.absorb(PathBuf::from(ROSTER_FILE), findings);
    } else {
        report.errors.push(format!("{ROSTER_FILE} file not found"));
    }

    let events = root.join(EVENTS_DIR);
    if events.is_dir() {
        check_pages(root, &events, &mut report);
    } else {
        report.errors.push(format!("{EVENTS_DIR}/ directory not found"));
    }

    let contrihub = root.join(CONTRIHUB_DIR);
    if contrihub.is_dir() {
        check_pages(root, &contrihub, &mut report);
    }

    report
}

fn check_pages(root: &Path, dir: &Path, report: &mut ValidationReport) {
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let page = match entry {
            Ok(page) => page,
            Err(e) => {
                let at = label(root, e.path().unwrap_or(dir));
                report.warnings.push(format!("{at}: Skipped unreadable entry - {e}"));
                continue;
            }
        };
        if !page.file_type().is_file()
            || !page.path().extension().is_some_and(|ext| ext == "md")
            || page.file_name() == "_index.md"
        {
            continue;
        }

        let relative = page.path().strip_prefix(root).unwrap_or(page.path());
        let name = relative.display().to_string();
        let findings = match read_source(page.path()) {
            Ok(source) => check_front_matter(&name, &source, is_event_page(relative)),
            Err(e) => {
                let mut findings = Findings::default();
                findings.error(&name, format!("{e:#}"));
                findings
            }
        };
        report.absorb(relative.to_path_buf(), findings);
    }
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn label(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Event pages carry stricter front matter, except the Docker workshop series.
pub fn is_event_page(relative: &Path) -> bool {
    relative.components().any(|c| c.as_os_str() == "events")
        && !relative.to_string_lossy().to_lowercase().contains("docker")
}

/// Checks the roster file at `path`, labelling messages with `label`.
pub fn check_roster(path: &Path, label: &str) -> Findings {
    match read_source(path) {
        Ok(source) => check_roster_source(label, &source),
        Err(e) => {
            let mut findings = Findings::default();
            findings.error(label, format!("{e:#}"));
            findings
        }
    }
}

pub fn check_roster_source(label: &str, source: &str) -> Findings {
    let mut findings = Findings::default();

    let data: Value = match serde_yaml::from_str(source) {
        Ok(data) => data,
        Err(e) => {
            findings.error(label, format!("YAML parsing error - {e}"));
            return findings;
        }
    };

    let Some(alumni) = data.as_mapping().and_then(|m| m.get("alumni")) else {
        findings.error(label, "Missing 'alumni' key at root");
        return findings;
    };
    let Some(alumni) = alumni.as_sequence() else {
        findings.error(label, "'alumni' must be a list");
        return findings;
    };

    for (idx, person) in alumni.iter().enumerate() {
        let number = idx + 1;
        let Some(person) = person.as_mapping() else {
            findings.error(label, format!("Alumni #{number} is not a mapping"));
            continue;
        };

        for field in ROSTER_REQUIRED {
            if !person.get(*field).is_some_and(is_truthy) {
                findings.error(label, format!("Alumni #{number} missing required field '{field}'"));
            }
        }

        if let Some(batch) = person.get("batch") {
            if let Err(message) = check_batch(&scalar_text(batch)) {
                findings.error(label, format!("Alumni #{number} {message}"));
            }
        }

        for key in person.keys() {
            let key = scalar_text(key);
            if !is_known_field(&key) {
                findings.warning(label, format!("Alumni #{number} has unknown field '{key}'"));
            }
        }
    }

    findings
}

fn is_known_field(key: &str) -> bool {
    ROSTER_REQUIRED
        .iter()
        .chain(ROSTER_OPTIONAL)
        .any(|field| *field == key)
}

/// Accepts `YYYY` or `YYYY-YYYY`.
pub fn check_batch(batch: &str) -> Result<(), String> {
    let is_year = |s: &str| s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit());
    if batch.contains('-') {
        let parts: Vec<&str> = batch.split('-').collect();
        if parts.len() != 2 || !parts.iter().all(|p| is_year(p)) {
            return Err(format!(
                "has invalid batch format '{batch}' (expected YYYY or YYYY-YYYY)"
            ));
        }
    } else if !is_year(batch) {
        return Err(format!(
            "has invalid batch year '{batch}' (expected 4-digit year)"
        ));
    }
    Ok(())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

/// Checks a page's `+++`-delimited TOML front matter.
pub fn check_front_matter(label: &str, source: &str, event_page: bool) -> Findings {
    let mut findings = Findings::default();

    if !source.starts_with("+++") {
        findings.warning(label, "No TOML frontmatter found");
        return findings;
    }

    let parts: Vec<&str> = source.splitn(3, "+++").collect();
    if parts.len() < 3 {
        findings.error(label, "Invalid frontmatter format");
        return findings;
    }

    let table: toml::Table = match parts[1].trim().parse() {
        Ok(table) => table,
        Err(e) => {
            findings.error(label, format!("Invalid TOML in frontmatter - {}", e.message()));
            return findings;
        }
    };

    if table.contains_key("date") && table.contains_key("start_date") {
        findings.error(label, "Duplicate date fields (date and start_date)");
    }

    if table.get("taxonomies").is_some_and(toml::Value::is_table) {
        findings.warning(label, "Using [taxonomies] - consider moving to [extra] for Goyo theme");
    }

    if event_page {
        for field in EVENT_REQUIRED {
            if !table.contains_key(*field) {
                findings.error(label, format!("Missing required field '{field}'"));
            }
        }
    }

    findings
}
