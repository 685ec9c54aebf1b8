use std::io::BufReader;

use jieba_rs::Jieba;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A word paired with its part-of-speech tag, as produced by tag mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedWord {
    pub word: String,
    pub tag: String,
}

/// The capability surface consumed from the segmentation engine.
///
/// Implemented for [`jieba_rs::Jieba`]; tests swap in a recording fake to
/// observe vocabulary mutations and to inject failures.
pub trait SegmentEngine {
    /// Exact-mode cut: a non-overlapping partition of the text.
    fn cut(&self, text: &str) -> Result<Vec<String>>;

    /// Full-mode cut: every substring recognized as a word.
    fn cut_all(&self, text: &str) -> Result<Vec<String>>;

    /// Search-engine cut: exact cut with long words re-split.
    fn cut_for_search(&self, text: &str) -> Result<Vec<String>>;

    /// Exact-mode cut with part-of-speech tags.
    fn tag(&self, text: &str) -> Result<Vec<TaggedWord>>;

    /// Adds one word to the engine vocabulary.
    fn add_word(&mut self, word: &str, frequency: Option<usize>, tag: Option<&str>);

    /// Ingests a whole dictionary source; the engine does its own line
    /// parsing on this route.
    fn load_dict(&mut self, content: &str) -> Result<()>;
}

impl SegmentEngine for Jieba {
    fn cut(&self, text: &str) -> Result<Vec<String>> {
        Ok(Jieba::cut(self, text, true)
            .into_iter()
            .map(str::to_owned)
            .collect())
    }

    fn cut_all(&self, text: &str) -> Result<Vec<String>> {
        Ok(Jieba::cut_all(self, text)
            .into_iter()
            .map(str::to_owned)
            .collect())
    }

    fn cut_for_search(&self, text: &str) -> Result<Vec<String>> {
        Ok(Jieba::cut_for_search(self, text, true)
            .into_iter()
            .map(str::to_owned)
            .collect())
    }

    fn tag(&self, text: &str) -> Result<Vec<TaggedWord>> {
        Ok(Jieba::tag(self, text, true)
            .into_iter()
            .map(|t| TaggedWord {
                word: t.word.to_owned(),
                tag: t.tag.to_owned(),
            })
            .collect())
    }

    fn add_word(&mut self, word: &str, frequency: Option<usize>, tag: Option<&str>) {
        Jieba::add_word(self, word, frequency, tag);
    }

    fn load_dict(&mut self, content: &str) -> Result<()> {
        let mut reader = BufReader::new(content.as_bytes());
        Jieba::load_dict(self, &mut reader).map_err(|e| Error::Config(e.to_string()))
    }
}
