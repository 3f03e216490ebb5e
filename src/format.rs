//! Output formatting utilities for markdown and JSON.

use crate::registry::{ConfigSection, UpdateReport};
use serde_json::{Value, json};

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

/// Format an update report as markdown.
pub fn format_report_markdown(report: &UpdateReport) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "# Update ({} changed, {} unchanged)\n",
        report.changed.len(),
        report.unchanged
    ));

    if !report.changed.is_empty() {
        md.push_str("\n## Changed\n");
        for key in &report.changed {
            md.push_str(&format!("- `{}`\n", key));
        }
    }

    if !report.unknown.is_empty() {
        md.push_str("\n## Unknown keys\n");
        for key in &report.unknown {
            md.push_str(&format!("- `{}`\n", key));
        }
    }

    if !report.failures.is_empty() {
        md.push_str("\n## Failures\n");
        for failure in &report.failures {
            md.push_str(&format!("- `{}`: {}\n", failure.key, failure.message));
        }
    }

    if !report.malformed.is_empty() {
        let lines: Vec<String> = report.malformed.iter().map(|n| n.to_string()).collect();
        md.push_str(&format!("\n**Malformed lines**: {}\n", lines.join(", ")));
    }

    md
}

/// Format a section's slots (key, kind, current value) as markdown.
pub fn format_section_markdown(section: &ConfigSection) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Section: {} ({} keys)\n\n", section.name(), section.len()));
    md.push_str("| key | kind | value |\n|---|---|---|\n");
    for item in section.iter() {
        md.push_str(&format!(
            "| `{}` | {} | {} |\n",
            item.key(),
            item.kind(),
            item.value()
        ));
    }

    md
}

/// Format a section's slots as JSON.
pub fn format_section_json(section: &ConfigSection) -> Value {
    let items: Vec<Value> = section
        .iter()
        .map(|item| {
            json!({
                "key": item.key(),
                "kind": item.kind().to_string(),
                "value": item.value().to_string(),
            })
        })
        .collect();

    json!({
        "section": section.name(),
        "items": items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::UpdateFailure;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("md"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::from_str("yaml"), None);
    }

    #[test]
    fn test_report_markdown() {
        let report = UpdateReport {
            changed: vec!["control:altitude_max".into()],
            unchanged: 2,
            unknown: vec![],
            failures: vec![UpdateFailure {
                key: "general:navdata_demo".into(),
                raw: "maybe".into(),
                message: "cannot parse".into(),
            }],
            malformed: vec![3, 7],
        };
        let md = format_report_markdown(&report);
        assert!(md.starts_with("# Update (1 changed, 2 unchanged)\n"));
        assert!(md.contains("- `control:altitude_max`\n"));
        assert!(!md.contains("## Unknown keys"));
        assert!(md.contains("- `general:navdata_demo`: cannot parse\n"));
        assert!(md.contains("**Malformed lines**: 3, 7"));
    }

    #[test]
    fn test_section_json() {
        let mut section = ConfigSection::new("test");
        section.slot::<i32>("control:altitude_max").unwrap();
        section.apply("control:altitude_max", "3000").unwrap();

        let json = format_section_json(&section);
        assert_eq!(json["section"], "test");
        assert_eq!(json["items"][0]["kind"], "integer");
        assert_eq!(json["items"][0]["value"], "3000");
    }

    #[test]
    fn test_section_markdown() {
        let mut section = ConfigSection::new("test");
        section.slot::<bool>("general:navdata_demo").unwrap();
        let md = format_section_markdown(&section);
        assert!(md.contains("| `general:navdata_demo` | boolean | false |"));
    }
}
