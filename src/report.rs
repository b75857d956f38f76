use std::collections::HashSet;

use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};
use regex::Regex;
use serde::Serialize;

use crate::types::Task;

/// Which family of result lines to scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    Splitcount,
    DiskRgb,
    DiskHsl,
    FeatureAccu,
    MeasureAccu,
    MeasureRecl,
}

impl ReportKind {
    /// Anchored at the line start only; trailing text after the value is
    /// tolerated, matching how historical results files were scraped.
    pub fn pattern(self) -> &'static str {
        match self {
            ReportKind::Splitcount => r"^splitcount_(\d+)_(\d+): (\d+)",
            ReportKind::DiskRgb => r"^disk_rgb_(\d+)_dim(\d+): (\d+)",
            ReportKind::DiskHsl => r"^disk_hsl_(\d+)_dim(\d+): (\d+)",
            ReportKind::FeatureAccu => r"^feature_accu_(\d+)_strategy(\d+): (\d+(?:\.\d+)?)",
            ReportKind::MeasureAccu => r"^measure_accu_strategy(\d+): (\d+(?:\.\d+)?)",
            ReportKind::MeasureRecl => r"^measure_recl_strategy(\d+): (\d+(?:\.\d+)?)",
        }
    }

    fn regex(self) -> Regex {
        Regex::new(self.pattern()).expect("report patterns are valid regexes")
    }
}

/// Extract a tuple from every line matching the kind's pattern, preserving
/// top-to-bottom order of appearance. Non-matching lines are silently skipped.
pub fn scrape(contents: &str, kind: ReportKind) -> Vec<Vec<String>> {
    let re = kind.regex();
    let mut rows = Vec::new();
    for line in contents.lines() {
        if let Some(caps) = re.captures(line) {
            rows.push(
                caps.iter()
                    .skip(1)
                    .flatten()
                    .map(|m| m.as_str().to_string())
                    .collect(),
            );
        }
    }
    rows
}

/// Render rows in the historical copy-paste form: `{a, b, c},{d, e, f},`.
pub fn format_tuples(rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push('{');
        out.push_str(&row.join(", "));
        out.push_str("},");
    }
    out
}

pub fn format_tuples_json(rows: &[Vec<String>]) -> String {
    serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
}

#[derive(Serialize)]
struct JsonTask<'a> {
    name: &'a str,
    command: &'a str,
    done: bool,
}

/// Task list with completion status, one line per task plus a count footer.
pub fn format_task_list(tasks: &[Task], completed: &HashSet<String>) -> String {
    let mut out = String::new();
    let mut done = 0;

    for task in tasks {
        let is_done = completed.contains(&task.name);
        if is_done {
            done += 1;
        }
        // Pad the plain marker before coloring so ANSI codes don't skew columns
        let marker = format!("{:<7}", if is_done { "done" } else { "pending" });
        let marker_colored = if is_done {
            marker
                .if_supports_color(Stream::Stdout, |s| s.green())
                .to_string()
        } else {
            marker
                .if_supports_color(Stream::Stdout, |s| s.yellow())
                .to_string()
        };
        out.push_str(&format!("{} {}: {}\n", marker_colored, task.name, task.command));
    }

    let footer = format!("{} tasks, {} done", tasks.len(), done);
    out.push_str(
        &footer
            .if_supports_color(Stream::Stdout, |s| s.dimmed())
            .to_string(),
    );
    out.push('\n');
    out
}

pub fn format_task_list_json(tasks: &[Task], completed: &HashSet<String>) -> String {
    let json_tasks: Vec<JsonTask> = tasks
        .iter()
        .map(|task| JsonTask {
            name: &task.name,
            command: &task.command,
            done: completed.contains(&task.name),
        })
        .collect();

    serde_json::to_string_pretty(&json_tasks).unwrap_or_else(|_| "[]".to_string())
}
