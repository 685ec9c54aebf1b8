use serde::Serialize;

use crate::config::TokenizeMode;
use crate::engine::{SegmentEngine, TaggedWord};
use crate::error::Result;

/// Text plus strategy for one record.
#[derive(Debug, Clone)]
pub struct TokenizationRequest {
    pub text: String,
    pub mode: TokenizeMode,
}

/// Uniform token shape produced by every mode.
#[derive(Debug, Clone, Serialize)]
pub struct TokenizationResult {
    pub tokens: Vec<String>,
    pub token_count: usize,
    /// Present only in tag mode.
    pub tagged_tokens: Option<Vec<TaggedWord>>,
}

/// Routes one request to exactly one engine capability call.
///
/// Assumes dictionary reconciliation already ran for this record; no mode
/// touches dictionary state. A capability failure propagates to the caller,
/// which owns the per-record continuation policy.
pub fn dispatch<E: SegmentEngine>(
    engine: &E,
    request: &TokenizationRequest,
) -> Result<TokenizationResult> {
    let result = match request.mode {
        TokenizeMode::Exact => from_tokens(engine.cut(&request.text)?),
        TokenizeMode::Full => from_tokens(engine.cut_all(&request.text)?),
        TokenizeMode::Search => from_tokens(engine.cut_for_search(&request.text)?),
        TokenizeMode::Tag => {
            let tagged = engine.tag(&request.text)?;
            let tokens: Vec<String> = tagged.iter().map(|t| t.word.clone()).collect();
            TokenizationResult {
                token_count: tokens.len(),
                tokens,
                tagged_tokens: Some(tagged),
            }
        }
    };
    Ok(result)
}

fn from_tokens(tokens: Vec<String>) -> TokenizationResult {
    TokenizationResult {
        token_count: tokens.len(),
        tokens,
        tagged_tokens: None,
    }
}
