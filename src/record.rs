use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::config::{DictionaryConfig, TokenizeMode};
use crate::dispatch::TokenizationResult;
use crate::error::{Error, Result};

/// One record of the host's item stream.
///
/// `json` carries the record payload; `pairedItem` is host pairing metadata
/// and is passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowItem {
    #[serde(default)]
    pub json: Map<String, Value>,

    #[serde(rename = "pairedItem", skip_serializing_if = "Option::is_none")]
    pub paired_item: Option<Value>,
}

impl FlowItem {
    /// Builds an item from a bare JSON payload.
    pub fn from_json(json: Map<String, Value>) -> Self {
        FlowItem {
            json,
            paired_item: None,
        }
    }

    /// The error-payload record emitted in place of a failing record when
    /// the host continues on failure.
    pub fn error_item(err: &Error) -> Self {
        let mut json = Map::new();
        json.insert("error".to_owned(), Value::String(err.to_string()));
        FlowItem {
            json,
            paired_item: None,
        }
    }

    /// Merges the tokenization output onto a copy of this record.
    ///
    /// Existing payload fields are kept; `originalText`, `tokens`,
    /// `tokenCount` and `mode` are added (overwriting fields of the same
    /// name), plus `taggedTokens` in tag mode only.
    pub fn with_result(
        &self,
        text: &str,
        mode: TokenizeMode,
        result: &TokenizationResult,
    ) -> Self {
        let mut json = self.json.clone();
        json.insert("originalText".to_owned(), Value::String(text.to_owned()));
        json.insert(
            "tokens".to_owned(),
            Value::Array(result.tokens.iter().cloned().map(Value::String).collect()),
        );
        json.insert("tokenCount".to_owned(), json!(result.token_count));
        json.insert("mode".to_owned(), Value::String(mode.as_str().to_owned()));
        if let Some(tagged) = &result.tagged_tokens {
            let pairs = tagged
                .iter()
                .map(|t| json!({ "word": t.word, "tag": t.tag }))
                .collect();
            json.insert("taggedTokens".to_owned(), Value::Array(pairs));
        }
        FlowItem {
            json,
            paired_item: self.paired_item.clone(),
        }
    }
}

/// Batch-level defaults and failure policy for a processing run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Record field holding the text to tokenize.
    pub text_field: String,

    /// Mode used when a record carries no `mode` field.
    pub mode: TokenizeMode,

    /// Dictionary used when a record carries no `customDictionary` field.
    pub dictionary: DictionaryConfig,

    /// Replace a failing record with its error payload instead of aborting
    /// the batch.
    pub continue_on_fail: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions {
            text_field: "text".to_owned(),
            mode: TokenizeMode::Exact,
            dictionary: DictionaryConfig::None,
            continue_on_fail: false,
        }
    }
}

/// Per-record parameters, resolved from the record plus batch defaults.
#[derive(Debug, Clone)]
pub struct TokenizeParams {
    pub text: String,
    pub mode: TokenizeMode,
    pub dictionary: DictionaryConfig,
}

impl TokenizeParams {
    /// Resolves one record's parameters.
    ///
    /// Record fields `mode` and `customDictionary` (with `dictionaryText` /
    /// `dictionaryPath`) override the batch defaults. The text field is
    /// required; non-empty text is expected but not validated.
    pub fn resolve(item: &FlowItem, opts: &BatchOptions) -> Result<Self> {
        let text = item
            .json
            .get(&opts.text_field)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::Config(format!(
                    "record is missing text field \"{}\"",
                    opts.text_field
                ))
            })?
            .to_owned();

        let mode = match item.json.get("mode").and_then(Value::as_str) {
            Some(name) => TokenizeMode::try_from(name)?,
            None => opts.mode,
        };

        let dictionary = match item.json.get("customDictionary").and_then(Value::as_str) {
            Some(selector) => DictionaryConfig::from_selector(
                selector,
                item.json.get("dictionaryText").and_then(Value::as_str),
                item.json.get("dictionaryPath").and_then(Value::as_str),
            )?,
            None => opts.dictionary.clone(),
        };

        Ok(TokenizeParams {
            text,
            mode,
            dictionary,
        })
    }
}
