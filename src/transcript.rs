//! Transcript parsing: raw text or caller-supplied turns into role-tagged turns.
//!
//! Parsing never fails. JSON that does not parse falls back to the line
//! heuristic, and empty input yields an empty turn list.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Speaker role attached to a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Tool => "tool",
        }
    }

    /// Map a speaker label ("Human", "ChatGPT said", "bot", ...) to a role.
    /// Unknown labels count as the user only when they mention "user".
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        match label.as_str() {
            "you" | "human" | "me" | "customer" | "user" | "you said" => Role::User,
            "assistant" | "ai" | "chatgpt" | "model" | "chatgpt said" | "bot" => Role::Assistant,
            "system" => Role::System,
            "tool" => Role::Tool,
            other if other.contains("user") => Role::User,
            _ => Role::Assistant,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contiguous block of text attributed to a single speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub index: usize,
}

/// A turn as handed over by a caller that already decoded its input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTurn {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl RawTurn {
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            text: Some(text.into()),
        }
    }
}

/// The two accepted input shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptInput {
    Raw(String),
    Structured(Vec<RawTurn>),
}

impl From<&str> for TranscriptInput {
    fn from(s: &str) -> Self {
        TranscriptInput::Raw(s.to_string())
    }
}

impl From<String> for TranscriptInput {
    fn from(s: String) -> Self {
        TranscriptInput::Raw(s)
    }
}

impl From<Vec<RawTurn>> for TranscriptInput {
    fn from(turns: Vec<RawTurn>) -> Self {
        TranscriptInput::Structured(turns)
    }
}

// "<label>: rest", "<label> > rest" or "<label> - rest"; a bare hyphen inside a word is not a separator
static LABEL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z ]{0,29}?)\s*(?::|>|-\s)\s*(.*)$").expect("regex should compile")
});

/// Parse a transcript into turns indexed by their final position.
pub fn parse_transcript(input: &TranscriptInput) -> Vec<Turn> {
    let pending = match input {
        TranscriptInput::Structured(raw) => from_raw_turns(raw),
        TranscriptInput::Raw(text) => parse_raw(text),
    };
    let turns = finalize(pending);
    tracing::debug!("parsed {} turns", turns.len());
    turns
}

fn parse_raw(text: &str) -> Vec<(Role, String)> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed.starts_with('[')
        && let Some(turns) = parse_json_turns(trimmed)
    {
        return turns;
    }
    parse_lines(trimmed)
}

/// Entries are filtered one by one: non-objects and entries without a string
/// `text` (or `content`) are skipped. An array holding no objects at all is
/// not a transcript and goes to the line heuristic.
fn parse_json_turns(text: &str) -> Option<Vec<(Role, String)>> {
    let entries: Vec<Value> = match serde_json::from_str(text) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("JSON transcript rejected, using line heuristic: {}", e);
            return None;
        }
    };
    if !entries.iter().any(Value::is_object) {
        tracing::debug!("JSON array has no turn objects, using line heuristic");
        return None;
    }
    Some(entries.iter().filter_map(json_turn).collect())
}

fn json_turn(entry: &Value) -> Option<(Role, String)> {
    let fields = entry.as_object()?;
    let text = ["text", "content"]
        .iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_str))?;
    let role = fields
        .get("role")
        .and_then(Value::as_str)
        .map(Role::from_label)
        .unwrap_or(Role::User);
    Some((role, text.to_string()))
}

fn from_raw_turns(raw: &[RawTurn]) -> Vec<(Role, String)> {
    raw.iter()
        .filter_map(|t| {
            let text = t.text.clone()?;
            let role = t
                .role
                .as_deref()
                .map(Role::from_label)
                .unwrap_or(Role::User);
            Some((role, text))
        })
        .collect()
}

fn parse_lines(text: &str) -> Vec<(Role, String)> {
    let mut turns: Vec<(Role, String)> = Vec::new();
    for line in text.lines() {
        if let Some(caps) = LABEL_LINE.captures(line) {
            let role = Role::from_label(&caps[1]);
            turns.push((role, caps[2].to_string()));
            continue;
        }
        match turns.last_mut() {
            Some((_, body)) => {
                body.push('\n');
                body.push_str(line);
            }
            None => turns.push((Role::User, line.to_string())),
        }
    }
    turns
        .into_iter()
        .map(|(role, body)| (role, body.trim().to_string()))
        .collect()
}

fn finalize(pending: Vec<(Role, String)>) -> Vec<Turn> {
    pending
        .into_iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .enumerate()
        .map(|(index, (role, text))| Turn { role, text, index })
        .collect()
}
