//! Renders catalog rules as human-readable text, Markdown, or JSON.
//!
//! Everything here is a pure function of its input; callers decide where the output goes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rules::{Rule, RULES};
use crate::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Markdown,
    Json,
}

impl Format {
    fn as_str(&self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Markdown => "markdown",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "markdown" | "md" => Ok(Format::Markdown),
            "json" => Ok(Format::Json),
            other => Err(format!(
                "unknown format: {other} (expected text, markdown or json)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Include the bad/good example pair
    pub examples: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { examples: true }
    }
}

/// Plain-text rendering of one rule with its examples.
pub fn render(rule: &Rule) -> String {
    text(rule, &RenderOptions::default())
}

/// Plain-text rendering of the whole catalog, in catalog order.
pub fn render_all() -> String {
    join_text(RULES, &RenderOptions::default())
}

pub fn render_as(rule: &Rule, format: Format, opts: &RenderOptions) -> Result<String> {
    match format {
        Format::Text => Ok(text(rule, opts)),
        Format::Markdown => Ok(markdown(rule, opts)),
        Format::Json => Ok(serde_json::to_string_pretty(&RuleView::new(rule, opts))?),
    }
}

pub fn render_all_as(rules: &[Rule], format: Format, opts: &RenderOptions) -> Result<String> {
    match format {
        Format::Text => Ok(join_text(rules, opts)),
        Format::Markdown => {
            let mut out = String::from("# Clean code rules\n\n");
            out.push_str(&render_index_markdown(rules));
            for rule in rules {
                out.push('\n');
                out.push_str(&markdown(rule, opts));
            }
            Ok(out)
        }
        Format::Json => {
            let views: Vec<RuleView<'_>> = rules.iter().map(|r| RuleView::new(r, opts)).collect();
            Ok(serde_json::to_string_pretty(&views)?)
        }
    }
}

/// One "id  title" line per rule, ids padded to a common width.
pub fn render_index(rules: &[Rule]) -> String {
    let width = rules.iter().map(|r| r.id.len()).max().unwrap_or(0);
    let mut out = String::with_capacity(rules.len() * 48);
    for rule in rules {
        out.push_str(&format!("{:<width$}  {}\n", rule.id, rule.title));
    }
    out
}

// Links by id only; repeating titles here would duplicate them in the guide.
fn render_index_markdown(rules: &[Rule]) -> String {
    let mut out = String::new();
    for rule in rules {
        out.push_str("- [`");
        out.push_str(rule.id);
        out.push_str("`](#");
        out.push_str(&anchor(rule.title));
        out.push_str(")\n");
    }
    out
}

fn join_text(rules: &[Rule], opts: &RenderOptions) -> String {
    rules
        .iter()
        .map(|r| text(r, opts))
        .collect::<Vec<_>>()
        .join("\n")
}

fn text(rule: &Rule, opts: &RenderOptions) -> String {
    let mut out = String::with_capacity(1024);

    out.push_str(rule.title);
    out.push_str(" [");
    out.push_str(rule.id);
    out.push_str("]\n\n");
    out.push_str(rule.description);
    out.push('\n');

    if !rule.guidance.is_empty() {
        out.push_str("\nGuidance:\n");
        for line in rule.guidance {
            out.push_str("  - ");
            out.push_str(line);
            out.push('\n');
        }
    }

    if opts.examples {
        out.push_str("\nAvoid:\n");
        push_indented(&mut out, rule.bad_example, 4);
        out.push_str("\nPrefer:\n");
        push_indented(&mut out, rule.good_example, 4);
    }

    out
}

fn markdown(rule: &Rule, opts: &RenderOptions) -> String {
    let mut out = String::with_capacity(1024);

    out.push_str("## ");
    out.push_str(rule.title);
    out.push_str("\n\nRule id: `");
    out.push_str(rule.id);
    out.push_str("`\n\n");
    out.push_str(rule.description);
    out.push_str("\n\n");

    for line in rule.guidance {
        out.push_str("- ");
        out.push_str(line);
        out.push('\n');
    }

    if opts.examples {
        out.push_str("\n**Avoid**\n\n```\n");
        out.push_str(rule.bad_example);
        out.push_str("\n```\n\n**Prefer**\n\n```\n");
        out.push_str(rule.good_example);
        out.push_str("\n```\n");
    }

    out
}

fn push_indented(out: &mut String, block: &str, indent: usize) {
    let pad = " ".repeat(indent);
    for line in block.lines() {
        if !line.is_empty() {
            out.push_str(&pad);
            out.push_str(line);
        }
        out.push('\n');
    }
}

/// GitHub-style heading anchor.
fn anchor(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            'a'..='z' | '0'..='9' | '-' | '_' => Some(c),
            ' ' => Some('-'),
            _ => None,
        })
        .collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RuleView<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    guidance: &'a [&'a str],
    #[serde(skip_serializing_if = "Option::is_none")]
    bad_example: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    good_example: Option<&'a str>,
}

impl<'a> RuleView<'a> {
    fn new(rule: &'a Rule, opts: &RenderOptions) -> Self {
        Self {
            id: rule.id,
            title: rule.title,
            description: rule.description,
            guidance: rule.guidance,
            bad_example: opts.examples.then_some(rule.bad_example),
            good_example: opts.examples.then_some(rule.good_example),
        }
    }
}
