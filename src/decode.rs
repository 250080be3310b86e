//! Tolerant decoding of model output into an [`ExplanationRecord`]
//!
//! The model is asked for strict JSON but nothing forces it to comply. Decoding
//! runs three stages in order and stops at the first one that yields a record:
//!
//! 1. **Direct**: parse the whole response.
//! 2. **Balanced block**: pull out every outermost `{ ... }` block and try them
//!    last-found first (prose usually comes before the JSON, not after).
//! 3. **Repaired**: swap typographic and single quotes for `"` and parse once
//!    more. Apostrophes in prose break this, so it only runs when 1 and 2 fail.
//!
//! Each stage is a separate function so it can be tested on its own.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Keys of the requested schema. A parsed object must carry at least one.
const RECORD_FIELDS: [&str; 3] = ["explanation", "optimized_code", "complexity"];

/// Free-form complexity estimate, not machine-verified
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityEstimate {
    #[serde(default, deserialize_with = "string_or_null")]
    pub time: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub space: String,
}

impl ComplexityEstimate {
    pub fn is_empty(&self) -> bool {
        self.time.trim().is_empty() && self.space.trim().is_empty()
    }
}

/// The structured answer requested from the completion service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationRecord {
    #[serde(default, deserialize_with = "string_or_null")]
    pub explanation: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub optimized_code: String,
    #[serde(default, deserialize_with = "complexity_field")]
    pub complexity: ComplexityEstimate,
}

/// Which stage recovered the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    Direct,
    BalancedBlock,
    Repaired,
}

impl DecodeStage {
    pub fn label(&self) -> &'static str {
        match self {
            DecodeStage::Direct => "direct",
            DecodeStage::BalancedBlock => "balanced_block",
            DecodeStage::Repaired => "repaired",
        }
    }
}

/// Recover a record from raw model output, or `None` if every stage fails
pub fn decode(raw: &str) -> Option<ExplanationRecord> {
    decode_with_stage(raw).map(|(record, _)| record)
}

/// Same as [`decode`], also reporting which stage succeeded
pub fn decode_with_stage(raw: &str) -> Option<(ExplanationRecord, DecodeStage)> {
    if let Some(record) = parse_direct(raw) {
        return Some((record, DecodeStage::Direct));
    }
    if let Some(record) = parse_balanced_blocks(raw) {
        return Some((record, DecodeStage::BalancedBlock));
    }
    parse_repaired(raw).map(|record| (record, DecodeStage::Repaired))
}

/// Stage 1: the whole text is the document
pub fn parse_direct(raw: &str) -> Option<ExplanationRecord> {
    parse_record(raw)
}

/// Stage 2: newest outermost block that parses
pub fn parse_balanced_blocks(raw: &str) -> Option<ExplanationRecord> {
    balanced_blocks(raw).into_iter().rev().find_map(parse_record)
}

/// Stage 3: quote normalization over the original text
pub fn parse_repaired(raw: &str) -> Option<ExplanationRecord> {
    parse_record(&repair_quotes(raw))
}

/// Every outermost `{ ... }` block, in the order they close.
///
/// Braces inside JSON strings are counted like any other brace. A `}` with no
/// open block is ignored, and a block still open at the end is dropped.
pub fn balanced_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut depth: usize = 0;
    let mut start = None;

    for (i, c) in text.char_indices() {
        match c {
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' => {
                if depth == 0 {
                    continue;
                }
                depth -= 1;
                if depth == 0 {
                    if let Some(s) = start.take() {
                        blocks.push(&text[s..=i]);
                    }
                }
            }
            _ => {}
        }
    }

    blocks
}

/// Normalize curly double quotes and all single quotes to `"`
pub fn repair_quotes(text: &str) -> String {
    text.replace(['\u{201C}', '\u{201D}'], "\"").replace('\'', "\"")
}

/// Parse one candidate and check it against the schema
fn parse_record(text: &str) -> Option<ExplanationRecord> {
    let value: Value = serde_json::from_str(text).ok()?;
    let object = value.as_object()?;
    if !RECORD_FIELDS.iter().any(|key| object.contains_key(*key)) {
        return None;
    }
    serde_json::from_value(value).ok()
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `complexity` is normally `{time, space}`, but models sometimes answer with
/// a single sentence. That sentence becomes the time estimate.
fn complexity_field<'de, D>(deserializer: D) -> Result<ComplexityEstimate, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ComplexityJson {
        Structured(ComplexityEstimate),
        Text(String),
    }

    Ok(match Option::<ComplexityJson>::deserialize(deserializer)? {
        Some(ComplexityJson::Structured(estimate)) => estimate,
        Some(ComplexityJson::Text(time)) => ComplexityEstimate {
            time,
            space: String::new(),
        },
        None => ComplexityEstimate::default(),
    })
}
