use std::fs;

use tracing::debug;

use crate::config::DictionaryConfig;
use crate::engine::SegmentEngine;
use crate::error::{Error, Result};

/// One parsed line of an inline dictionary source.
///
/// Line layout: `word [frequency [partOfSpeech]]`, fields separated by runs
/// of whitespace. The tag is only honored when the frequency field parses as
/// an integer; `"张三 nr"` yields a bare word with neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub word: String,
    pub frequency: Option<usize>,
    pub part_of_speech: Option<String>,
}

impl DictionaryEntry {
    /// Parses one line, or `None` when the line holds no word.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let word = fields.next()?.to_owned();
        let frequency = fields.next().and_then(|f| f.parse::<usize>().ok());
        // A tag without a parsed frequency is dropped.
        let part_of_speech = match frequency {
            Some(_) => fields.next().map(str::to_owned),
            None => None,
        };
        Some(DictionaryEntry {
            word,
            frequency,
            part_of_speech,
        })
    }
}

/// Outcome of one reconciliation, returned as data so a failed dictionary
/// application never blocks segmentation. The caller decides whether to
/// log it.
#[derive(Debug)]
pub enum ReconcileOutcome {
    /// The requested configuration was (re)applied to the engine.
    Applied,
    /// The configuration matched the loaded one; the engine was not touched.
    Unchanged,
    /// No custom dictionary requested; load status cleared.
    Cleared,
    /// Application failed; segmentation proceeds with the vocabulary the
    /// engine already has, and the next record retries.
    Failed(Error),
}

/// Last-compared custom dictionary configuration, one slot per worker.
///
/// Mutated between records with no lock; safety comes from `&mut self`
/// exclusivity, so a multi-worker deployment gives each worker its own
/// state (and engine). Not a cache of dictionaries: switching to `None`
/// and back re-applies.
#[derive(Debug, Default)]
pub struct DictionaryState {
    last_config: DictionaryConfig,
    loaded: bool,
}

impl DictionaryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only after a configuration's entries reached the engine.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Last configuration compared, not necessarily applied.
    pub fn last_config(&self) -> &DictionaryConfig {
        &self.last_config
    }

    /// Brings the engine vocabulary in line with `config`.
    ///
    /// An unchanged, already-loaded configuration skips the engine entirely.
    /// The stored configuration is overwritten with the requested one before
    /// a load is attempted, so a failing load keeps comparing against the
    /// request itself rather than a stale baseline.
    pub fn reconcile<E: SegmentEngine>(
        &mut self,
        engine: &mut E,
        config: &DictionaryConfig,
    ) -> ReconcileOutcome {
        if matches!(config, DictionaryConfig::None) {
            self.last_config = DictionaryConfig::None;
            self.loaded = false;
            return ReconcileOutcome::Cleared;
        }

        let changed = self.last_config != *config;
        if self.loaded && !changed {
            self.last_config = config.clone();
            debug!("custom dictionary unchanged, skipping reload");
            return ReconcileOutcome::Unchanged;
        }

        self.last_config = config.clone();
        match Self::apply(engine, config) {
            Ok(()) => {
                self.loaded = true;
                ReconcileOutcome::Applied
            }
            Err(err) => {
                self.loaded = false;
                ReconcileOutcome::Failed(err)
            }
        }
    }

    fn apply<E: SegmentEngine>(engine: &mut E, config: &DictionaryConfig) -> Result<()> {
        match config {
            DictionaryConfig::None => Ok(()),
            DictionaryConfig::Inline(text) => {
                let mut words = 0usize;
                for line in text.lines() {
                    if let Some(entry) = DictionaryEntry::parse_line(line) {
                        engine.add_word(
                            &entry.word,
                            entry.frequency,
                            entry.part_of_speech.as_deref(),
                        );
                        words += 1;
                    }
                }
                debug!(words, "inline dictionary applied");
                Ok(())
            }
            DictionaryConfig::File(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "dictionary file not found: {}",
                        path.display()
                    )));
                }
                let content = fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("dictionary file {}: {e}", path.display()))
                })?;
                // Bulk route: the engine parses the file content itself,
                // unlike the per-entry inline route above.
                engine.load_dict(&content)?;
                debug!(path = %path.display(), "dictionary file applied");
                Ok(())
            }
        }
    }
}
