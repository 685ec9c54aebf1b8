use std::path::PathBuf;

use crate::error::{Error, Result};

/// Segmentation strategy for one record (strongly-typed).
///
/// The host selects a mode by its wire name; [`TokenizeMode::as_str`] echoes
/// that name back into the record's `mode` output field.
///
/// | Variant  | Wire name  | Description                                   |
/// |----------|------------|-----------------------------------------------|
/// | `Exact`  | `default`  | Non-overlapping partition, general analysis   |
/// | `Full`   | `full`     | All substrings recognized as words            |
/// | `Search` | `search`   | Exact cut with long words re-split            |
/// | `Tag`    | `tag`      | Exact cut with part-of-speech tags            |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenizeMode {
    /// Exact mode, the host's default.
    #[default]
    Exact,

    /// Full mode: every possible word, overlapping.
    Full,

    /// Search-engine mode.
    Search,

    /// Part-of-speech tagging mode.
    Tag,
}

impl TokenizeMode {
    /// The wire name of this mode, as written to the `mode` output field.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenizeMode::Exact => "default",
            TokenizeMode::Full => "full",
            TokenizeMode::Search => "search",
            TokenizeMode::Tag => "tag",
        }
    }
}

impl TryFrom<&str> for TokenizeMode {
    type Error = Error;

    /// Parses a mode wire name (case-insensitive).
    ///
    /// Accepted names: `"default"`, `"full"`, `"search"`, `"tag"`.
    fn try_from(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Exact),
            "full" => Ok(Self::Full),
            "search" => Ok(Self::Search),
            "tag" => Ok(Self::Tag),
            _ => Err(Error::Config(format!(
                "invalid mode \"{s}\", expected one of [default|full|search|tag]"
            ))),
        }
    }
}

/// Requested custom dictionary for one record evaluation.
///
/// The variant is the source selector; each carries the one field that is
/// meaningful for it. Equality (the reconciler's change detection) compares
/// the variant and that field exactly, with no normalization; two inline
/// texts differing only in trailing whitespace are distinct configurations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DictionaryConfig {
    /// No custom dictionary.
    #[default]
    None,

    /// Entries given inline, one `word [frequency [tag]]` per line.
    Inline(String),

    /// Path to a dictionary file the engine ingests as a whole.
    File(PathBuf),
}

impl DictionaryConfig {
    /// Builds a config from the host's `customDictionary` selector plus its
    /// associated `dictionaryText` / `dictionaryPath` field.
    ///
    /// Accepted selectors (case-insensitive): `"none"`, `"text"`, `"file"`.
    pub fn from_selector(
        selector: &str,
        text: Option<&str>,
        path: Option<&str>,
    ) -> Result<Self> {
        match selector.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "text" => text
                .map(|t| Self::Inline(t.to_owned()))
                .ok_or_else(|| {
                    Error::Config("customDictionary \"text\" requires dictionaryText".to_owned())
                }),
            "file" => path
                .map(|p| Self::File(PathBuf::from(p)))
                .ok_or_else(|| {
                    Error::Config("customDictionary \"file\" requires dictionaryPath".to_owned())
                }),
            _ => Err(Error::Config(format!(
                "invalid customDictionary \"{selector}\", expected one of [none|text|file]"
            ))),
        }
    }
}
