//! Markdown rendering of offers

use chrono::SecondsFormat;
use std::fmt;

use super::Offer;

/// Backslash-escape every ASCII punctuation character so the label renders literally
fn escape_label(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        if c.is_ascii_punctuation() {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// A code span whose fence is longer than any backtick run inside `text`
fn code_span(text: &str) -> String {
    let longest_run = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or_default();
    let fence = "`".repeat(longest_run + 1);

    if longest_run == 0 {
        format!("{fence}{text}{fence}")
    } else {
        format!("{fence} {text} {fence}")
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags = self
            .tags()
            .iter()
            .map(|tag| code_span(tag))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(f, "### [{}](<{}>)", escape_label(self.name()), self.url())?;
        writeln!(f, "---")?;
        writeln!(f, "Seniority: {}", self.seniority())?;
        writeln!(f, "Tags: {}", tags)?;
        writeln!(f, "Language: {}", self.language())?;
        write!(
            f,
            "Scraped on: {}",
            self.scraped_on().to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }
}
