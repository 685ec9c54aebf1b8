//! Per-item Chinese word segmentation for workflow item streams.
//!
//! Each record passes through two stages: the dictionary reconciler, which
//! brings the shared Jieba vocabulary in line with the record's requested
//! custom dictionary (skipping the reload when the configuration did not
//! change since the previous record), and the mode dispatcher, which runs
//! one of four segmentation strategies and merges tokens, token count and
//! optional part-of-speech tags back onto the record.
//!
//! ```no_run
//! use flow_jieba_rs::{BatchOptions, FlowItem, FlowTokenizer};
//!
//! let mut tokenizer = FlowTokenizer::new();
//! let items: Vec<FlowItem> = serde_json::from_str(r#"[{"json": {"text": "我爱北京天安门"}}]"#).unwrap();
//! let records = tokenizer.process_batch(&items, &BatchOptions::default()).unwrap();
//! println!("{:?}", records[0].json["tokens"]);
//! ```

use jieba_rs::Jieba;
use tracing::warn;

pub mod config;
pub mod dictionary;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod record;

pub use config::{DictionaryConfig, TokenizeMode};
pub use dictionary::{DictionaryEntry, DictionaryState, ReconcileOutcome};
pub use dispatch::{dispatch, TokenizationRequest, TokenizationResult};
pub use engine::{SegmentEngine, TaggedWord};
pub use error::{Error, Result};
pub use record::{BatchOptions, FlowItem, TokenizeParams};

/// Tokenizes records one at a time against a shared segmentation engine.
///
/// Owns the engine vocabulary and the last-applied dictionary state. One
/// instance per worker: records are processed strictly in input order with
/// no concurrency, which is what makes the unlocked dictionary state safe.
pub struct FlowTokenizer<E = Jieba> {
    engine: E,
    dict_state: DictionaryState,
}

impl FlowTokenizer<Jieba> {
    /// Tokenizer backed by Jieba with its default dictionary.
    pub fn new() -> Self {
        FlowTokenizer::with_engine(Jieba::new())
    }
}

impl Default for FlowTokenizer<Jieba> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SegmentEngine> FlowTokenizer<E> {
    /// Tokenizer backed by a caller-supplied engine.
    pub fn with_engine(engine: E) -> Self {
        FlowTokenizer {
            engine,
            dict_state: DictionaryState::new(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The reconciler's dictionary state, for inspection.
    pub fn dictionary_state(&self) -> &DictionaryState {
        &self.dict_state
    }

    /// Processes one record: reconcile the dictionary, run exactly one
    /// segmentation capability, merge the output onto the record.
    ///
    /// A failing dictionary application is logged and swallowed here:
    /// segmentation runs with whatever vocabulary the engine already has,
    /// and the next record retries the load. Segmentation failures and
    /// parameter errors propagate.
    pub fn process_item(&mut self, item: &FlowItem, params: &TokenizeParams) -> Result<FlowItem> {
        if let ReconcileOutcome::Failed(err) =
            self.dict_state.reconcile(&mut self.engine, &params.dictionary)
        {
            warn!(error = %err, "custom dictionary not applied");
        }

        let request = TokenizationRequest {
            text: params.text.clone(),
            mode: params.mode,
        };
        let result = dispatch(&self.engine, &request)?;
        Ok(item.with_result(&params.text, params.mode, &result))
    }

    /// Processes a batch strictly in input order, one record at a time.
    ///
    /// With `continue_on_fail`, a failing record is replaced by its error
    /// payload (`{"json": {"error": …}}`) and the batch keeps going;
    /// otherwise the first failure aborts the whole batch.
    pub fn process_batch(
        &mut self,
        items: &[FlowItem],
        opts: &BatchOptions,
    ) -> Result<Vec<FlowItem>> {
        let mut records = Vec::with_capacity(items.len());
        for item in items {
            match TokenizeParams::resolve(item, opts)
                .and_then(|params| self.process_item(item, &params))
            {
                Ok(record) => records.push(record),
                Err(err) if opts.continue_on_fail => records.push(FlowItem::error_item(&err)),
                Err(err) => return Err(err),
            }
        }
        Ok(records)
    }
}
