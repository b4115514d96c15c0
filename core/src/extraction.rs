//! Structured-data extraction and display sanitising for model output.
//!
//! Model text is adversarial in the mild sense: formats drift between
//! providers and turns. Extraction therefore runs in two tiers. Tier 1 reads
//! fenced JSON records `{"compound_name", "smiles"}` and validates each one on
//! its own; tier 2 (legacy `label: SMILES` lines) only runs when tier 1 found
//! nothing.

use std::fmt;

use log::Level;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::logging::log_event;

// An opener either starts its line (tag optional) or follows prose on the same
// line with a tag. The closer must stand alone on its line.
static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ms)(?:^[ \t]*```[ \t]*([A-Za-z0-9_+\-]*)|[ \t]*```[ \t]*([A-Za-z0-9_+\-]+))[ \t]*\r?\n(.*?)^[ \t]*```[ \t]*\r?$",
    )
    .expect("fenced block pattern is valid")
});

static LEGACY_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*(?:[-*・][ \t]*)?([^\s:：`"'{}\[\]][^:：`\n]*?)[ \t]*[:：][ \t]*([A-Za-z0-9@+\-\[\]()=#/\\.%*]+)[ \t]*\r?$"#,
    )
    .expect("legacy marker pattern is valid")
});

static INLINE_SMILES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[ \t]*(?-u:\b)SMILES[ \t]*[:：][ \t]*([A-Za-z0-9@+\-\[\]()=#/\\.%*]+)[ \t]*")
        .expect("inline marker pattern is valid")
});

static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("newline pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureFormat {
    Smiles,
    Ket,
    Inchi,
    Molfile,
}

impl StructureFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Smiles => "smiles",
            Self::Ket => "ket",
            Self::Inchi => "inchi",
            Self::Molfile => "molfile",
        }
    }
}

impl fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureAction {
    Add,
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemicalStructure {
    pub format: StructureFormat,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub action: StructureAction,
}

impl ChemicalStructure {
    pub fn smiles(data: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            format: StructureFormat::Smiles,
            data: data.into(),
            label: Some(label.into()),
            action: StructureAction::Add,
        }
    }

    pub fn label_or_data(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.data)
    }
}

#[derive(Debug, Deserialize)]
struct StructureRecord {
    compound_name: Option<String>,
    smiles: Option<String>,
}

fn fence_tag<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map_or("", |m| m.as_str())
}

fn is_structured_tag(tag: &str) -> bool {
    tag.is_empty() || tag.eq_ignore_ascii_case("json")
}

/// Extract every accepted structure, first-seen order, duplicates kept.
pub fn extract_structures(text: &str) -> Vec<ChemicalStructure> {
    let fenced = fenced_structures(text);
    if !fenced.is_empty() {
        return fenced;
    }
    legacy_structures(text)
}

fn fenced_structures(text: &str) -> Vec<ChemicalStructure> {
    let mut structures = Vec::new();
    for (index, caps) in FENCED_BLOCK.captures_iter(text).enumerate() {
        if !is_structured_tag(fence_tag(&caps)) {
            continue;
        }
        match parse_record(caps[3].trim()) {
            Ok((name, smiles)) => structures.push(ChemicalStructure::smiles(smiles, name)),
            Err(reason) => {
                log_event(
                    Level::Warn,
                    Some("AI-0300"),
                    "ai.extraction",
                    "Skipped fenced block",
                    Some(reason),
                    Some(json!({ "block": index })),
                );
            }
        }
    }
    structures
}

fn parse_record(body: &str) -> Result<(String, String), &'static str> {
    let record: StructureRecord =
        serde_json::from_str(body).map_err(|_| "block is not a structure record")?;
    let name = record
        .compound_name
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or("compound_name missing or blank")?;
    let smiles = record
        .smiles
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or("smiles missing or blank")?;
    Ok((name, smiles))
}

fn legacy_structures(text: &str) -> Vec<ChemicalStructure> {
    let mut markers: Vec<(usize, Option<&str>, &str)> = Vec::new();
    let mut lines = Vec::new();
    for caps in LEGACY_MARKER.captures_iter(text) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        let label = caps.get(1).map_or("", |m| m.as_str());
        let data = caps.get(2).map_or("", |m| m.as_str());
        markers.push((whole.start, Some(label), data));
        lines.push(whole);
    }
    for caps in INLINE_SMILES.captures_iter(text) {
        let Some(encoding) = caps.get(1) else {
            continue;
        };
        if lines.iter().any(|line| line.contains(&encoding.start())) {
            continue;
        }
        markers.push((encoding.start(), None, encoding.as_str()));
    }
    markers.sort_by_key(|(start, _, _)| *start);

    let mut structures = Vec::new();
    for (_, label, data) in markers {
        let data = data.trim();
        if data.is_empty() {
            continue;
        }
        let label = match label.map(str::trim) {
            Some(label) if !label.is_empty() && !label.eq_ignore_ascii_case("smiles") => {
                label.to_string()
            }
            _ => format!("structure {}", structures.len() + 1),
        };
        structures.push(ChemicalStructure::smiles(data, label));
    }
    structures
}

/// Strip structured markup for display. Idempotent.
pub fn sanitize(text: &str) -> String {
    let mut current = sanitize_pass(text);
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

// Every pass that changes its input makes it strictly shorter.
fn sanitize_pass(text: &str) -> String {
    let without_blocks = FENCED_BLOCK.replace_all(text, |caps: &Captures| {
        if is_structured_tag(fence_tag(caps)) {
            "\n\n".to_string()
        } else {
            caps[0].to_string()
        }
    });
    let without_lines = LEGACY_MARKER.replace_all(&without_blocks, "");
    let without_inline = INLINE_SMILES.replace_all(&without_lines, |caps: &Captures| {
        let Some(whole) = caps.get(0) else {
            return String::new();
        };
        let before = &without_lines[..whole.start()];
        let after = &without_lines[whole.end()..];
        let at_line_edge = before.is_empty()
            || before.ends_with('\n')
            || after.is_empty()
            || after.starts_with(['\n', '\r']);
        if at_line_edge {
            String::new()
        } else {
            " ".to_string()
        }
    });
    let collapsed = EXCESS_NEWLINES.replace_all(&without_inline, "\n\n");
    collapsed.trim().to_string()
}
