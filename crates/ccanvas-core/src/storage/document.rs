//! The persisted document schema.

use crate::line::{Line, LineId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coordinates of one line as parallel lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineRecord {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl LineRecord {
    pub fn from_line(line: &Line) -> Self {
        Self {
            x: line.xs(),
            y: line.ys(),
        }
    }

    /// Rebuild the line. Returns `None` when the lists differ in length.
    pub fn to_line(&self) -> Option<Line> {
        Line::from_xy(&self.x, &self.y)
    }
}

/// Mapping from `line_<k>` keys to coordinate lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedDocument {
    lines: BTreeMap<String, LineRecord>,
}

impl PersistedDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from lines in slot order; the first line becomes `line_1`.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a Line>) -> Self {
        let lines = lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| (LineId::from_index(index).key(), LineRecord::from_line(line)))
            .collect();
        Self { lines }
    }

    pub fn insert(&mut self, id: LineId, record: LineRecord) {
        self.lines.insert(id.key(), record);
    }

    pub fn get(&self, id: LineId) -> Option<&LineRecord> {
        self.lines.get(&id.key())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.lines.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Serialize as UTF-8 JSON with 4-space indentation. Non-ASCII text is
    /// written as-is.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever emits UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Deserialize a document without structural validation beyond the types.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
