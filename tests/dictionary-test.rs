use std::io::Write;

use flow_jieba_rs::{
    DictionaryConfig, DictionaryEntry, DictionaryState, Error, ReconcileOutcome, Result,
    SegmentEngine, TaggedWord,
};

/// Records every vocabulary mutation instead of segmenting for real.
#[derive(Default)]
struct RecordingEngine {
    added: Vec<(String, Option<usize>, Option<String>)>,
    bulk_loads: Vec<String>,
    reject_bulk_loads: bool,
}

impl RecordingEngine {
    fn mutations(&self) -> usize {
        self.added.len() + self.bulk_loads.len()
    }
}

impl SegmentEngine for RecordingEngine {
    fn cut(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.chars().map(String::from).collect())
    }

    fn cut_all(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.chars().map(String::from).collect())
    }

    fn cut_for_search(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.chars().map(String::from).collect())
    }

    fn tag(&self, text: &str) -> Result<Vec<TaggedWord>> {
        Ok(text
            .chars()
            .map(|c| TaggedWord {
                word: String::from(c),
                tag: "x".to_owned(),
            })
            .collect())
    }

    fn add_word(&mut self, word: &str, frequency: Option<usize>, tag: Option<&str>) {
        self.added
            .push((word.to_owned(), frequency, tag.map(str::to_owned)));
    }

    fn load_dict(&mut self, content: &str) -> Result<()> {
        if self.reject_bulk_loads {
            return Err(Error::Config("bulk load rejected".to_owned()));
        }
        self.bulk_loads.push(content.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_entry() {
        let entry = DictionaryEntry::parse_line("张三 10 nr").unwrap();
        assert_eq!(entry.word, "张三");
        assert_eq!(entry.frequency, Some(10));
        assert_eq!(entry.part_of_speech, Some("nr".to_owned()));
    }

    #[test]
    fn parse_drops_tag_without_frequency() {
        let entry = DictionaryEntry::parse_line("张三 nr").unwrap();
        assert_eq!(entry.word, "张三");
        assert_eq!(entry.frequency, None);
        assert_eq!(entry.part_of_speech, None);
    }

    #[test]
    fn parse_bare_word() {
        let entry = DictionaryEntry::parse_line("张三").unwrap();
        assert_eq!(entry.word, "张三");
        assert_eq!(entry.frequency, None);
        assert_eq!(entry.part_of_speech, None);
    }

    #[test]
    fn parse_blank_line_yields_nothing() {
        assert_eq!(DictionaryEntry::parse_line(""), None);
        assert_eq!(DictionaryEntry::parse_line("   \t"), None);
    }

    #[test]
    fn inline_entries_reach_engine_in_order() {
        let mut engine = RecordingEngine::default();
        let mut state = DictionaryState::new();
        let config = DictionaryConfig::Inline("张三 10 nr\n\n李四\n王五 7".to_owned());

        let outcome = state.reconcile(&mut engine, &config);
        assert!(matches!(outcome, ReconcileOutcome::Applied));
        assert!(state.is_loaded());
        assert_eq!(
            engine.added,
            vec![
                ("张三".to_owned(), Some(10), Some("nr".to_owned())),
                ("李四".to_owned(), None, None),
                ("王五".to_owned(), Some(7), None),
            ]
        );
    }

    #[test]
    fn unchanged_config_is_not_reapplied() {
        let mut engine = RecordingEngine::default();
        let mut state = DictionaryState::new();
        let config = DictionaryConfig::Inline("张三 10 nr".to_owned());

        assert!(matches!(
            state.reconcile(&mut engine, &config),
            ReconcileOutcome::Applied
        ));
        let after_first = engine.mutations();

        assert!(matches!(
            state.reconcile(&mut engine, &config.clone()),
            ReconcileOutcome::Unchanged
        ));
        assert_eq!(engine.mutations(), after_first);
        assert_eq!(state.last_config(), &config);
    }

    #[test]
    fn changed_inline_text_reapplies() {
        let mut engine = RecordingEngine::default();
        let mut state = DictionaryState::new();

        state.reconcile(&mut engine, &DictionaryConfig::Inline("张三".to_owned()));
        let after_first = engine.mutations();
        state.reconcile(&mut engine, &DictionaryConfig::Inline("李四".to_owned()));
        assert!(engine.mutations() > after_first);
    }

    #[test]
    fn trailing_whitespace_is_a_different_config() {
        let mut engine = RecordingEngine::default();
        let mut state = DictionaryState::new();

        state.reconcile(&mut engine, &DictionaryConfig::Inline("李四".to_owned()));
        let after_first = engine.mutations();
        state.reconcile(&mut engine, &DictionaryConfig::Inline("李四 ".to_owned()));
        assert!(engine.mutations() > after_first);
    }

    #[test]
    fn none_clears_load_status_and_forces_reapply() {
        let mut engine = RecordingEngine::default();
        let mut state = DictionaryState::new();
        let config = DictionaryConfig::Inline("张三 10".to_owned());

        state.reconcile(&mut engine, &config);
        assert!(state.is_loaded());

        let outcome = state.reconcile(&mut engine, &DictionaryConfig::None);
        assert!(matches!(outcome, ReconcileOutcome::Cleared));
        assert!(!state.is_loaded());

        // Single slot, not a cache: coming back re-applies.
        assert!(matches!(
            state.reconcile(&mut engine, &config),
            ReconcileOutcome::Applied
        ));
        assert_eq!(engine.added.len(), 2);
    }

    #[test]
    fn missing_file_fails_and_stays_unloaded() {
        let mut engine = RecordingEngine::default();
        let mut state = DictionaryState::new();
        let config = DictionaryConfig::File("/nonexistent/words.txt".into());

        let outcome = state.reconcile(&mut engine, &config);
        assert!(matches!(outcome, ReconcileOutcome::Failed(Error::Config(_))));
        assert!(!state.is_loaded());
        assert_eq!(state.last_config(), &config);

        // Not loaded, so the same config is retried instead of skipped.
        assert!(matches!(
            state.reconcile(&mut engine, &config),
            ReconcileOutcome::Failed(Error::Config(_))
        ));
        assert_eq!(engine.mutations(), 0);
    }

    #[test]
    fn file_route_uses_bulk_ingestion() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "张三 10 nr").unwrap();
        writeln!(file, "李四 5").unwrap();

        let mut engine = RecordingEngine::default();
        let mut state = DictionaryState::new();
        let config = DictionaryConfig::File(file.path().to_path_buf());

        let outcome = state.reconcile(&mut engine, &config);
        assert!(matches!(outcome, ReconcileOutcome::Applied));
        assert!(state.is_loaded());
        // The whole content goes through the engine's own parser; the
        // per-entry route stays untouched.
        assert_eq!(engine.bulk_loads.len(), 1);
        assert!(engine.bulk_loads[0].contains("李四 5"));
        assert!(engine.added.is_empty());
    }

    #[test]
    fn rejected_bulk_load_reports_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "张三 10 nr").unwrap();

        let mut engine = RecordingEngine {
            reject_bulk_loads: true,
            ..RecordingEngine::default()
        };
        let mut state = DictionaryState::new();
        let config = DictionaryConfig::File(file.path().to_path_buf());

        let outcome = state.reconcile(&mut engine, &config);
        assert!(matches!(outcome, ReconcileOutcome::Failed(Error::Config(_))));
        assert!(!state.is_loaded());
    }
}
