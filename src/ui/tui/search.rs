use crate::core::error::Error;
use crate::reader::navigator::Cursor;
use crate::search::engine::{SearchConfig, SearchEngine, SearchMatch};

// Characters of ayah text shown per result line
const RESULT_PREVIEW_CHARS: usize = 60;

/// State of the search screen
#[derive(Debug, Clone)]
pub(super) struct SearchPanel {
    pub query: String,
    pub ignore_diacritics: bool,
    pub ignore_hamza: bool,
    pub whole_word: bool,
    /// Limit the search to the unit being read
    pub current_unit_only: bool,
    pub results: Vec<SearchMatch>,
    pub selected: usize,
    pub message: Option<String>,
}

impl Default for SearchPanel {
    fn default() -> Self {
        Self {
            query: String::new(),
            ignore_diacritics: true,
            ignore_hamza: false,
            whole_word: false,
            current_unit_only: false,
            results: Vec::new(),
            selected: 0,
            message: None,
        }
    }
}

impl SearchPanel {
    pub fn config(&self, cursor: Cursor, unit_count: u32) -> SearchConfig {
        let (range_from, range_to) = if self.current_unit_only {
            (cursor.unit_number, cursor.unit_number)
        } else {
            (1, unit_count)
        };
        SearchConfig {
            ignore_diacritics: self.ignore_diacritics,
            ignore_hamza_variants: self.ignore_hamza,
            whole_word: self.whole_word,
            granularity: cursor.granularity,
            range_from,
            range_to,
        }
    }

    /// Run the query and keep either the results or a message for the user
    pub fn run(&mut self, engine: &SearchEngine, cursor: Cursor, unit_count: u32) {
        self.selected = 0;
        match engine.search(&self.query, &self.config(cursor, unit_count)) {
            Ok(results) => {
                self.message = results
                    .is_empty()
                    .then(|| "No results for this search.".to_string());
                self.results = results;
            }
            Err(Error::EmptyQuery) => {
                self.results.clear();
                self.message = Some("Type something to search for.".to_string());
            }
            Err(e) => {
                self.results.clear();
                self.message = Some(e.to_string());
            }
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_ayah(&self) -> Option<u32> {
        self.results
            .get(self.selected)
            .map(|m| m.absolute_verse_number)
    }
}

/// One line of the result list: "surah - ayah: text..."
pub(super) fn result_line(result: &SearchMatch) -> String {
    let preview: String = result.text.chars().take(RESULT_PREVIEW_CHARS).collect();
    let ellipsis = if result.text.chars().count() > RESULT_PREVIEW_CHARS { "..." } else { "" };
    format!(
        "{} - {}: {}{}",
        result.surah_name, result.number_in_surah, preview, ellipsis
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture;
    use crate::data::granularity::Granularity;
    use crate::data::quran::Quran;
    use std::sync::Arc;

    fn engine() -> SearchEngine {
        SearchEngine::new(Arc::new(
            Quran::from_json_str(&fixture::dataset_json()).unwrap(),
        ))
    }

    fn surah_cursor(unit_number: u32) -> Cursor {
        Cursor {
            granularity: Granularity::Surah,
            unit_number,
        }
    }

    #[test]
    fn test_current_unit_only_limits_range() {
        let mut panel = SearchPanel {
            query: "الله".to_string(),
            current_unit_only: true,
            ..SearchPanel::default()
        };
        panel.run(&engine(), surah_cursor(1), 114);
        assert!(!panel.results.is_empty());
        assert!(panel.results.iter().all(|m| m.absolute_verse_number <= 7));
        assert!(panel.message.is_none());
        assert_eq!(panel.selected_ayah(), Some(1));
    }

    #[test]
    fn test_empty_query_sets_message() {
        let mut panel = SearchPanel::default();
        panel.run(&engine(), surah_cursor(1), 114);
        assert!(panel.results.is_empty());
        assert_eq!(panel.message.as_deref(), Some("Type something to search for."));
    }

    #[test]
    fn test_no_results_message() {
        let mut panel = SearchPanel {
            query: "زيتون".to_string(),
            ..SearchPanel::default()
        };
        panel.run(&engine(), surah_cursor(1), 114);
        assert!(panel.results.is_empty());
        assert!(panel.message.is_some());
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut panel = SearchPanel {
            query: "الرحيم".to_string(),
            current_unit_only: true,
            ..SearchPanel::default()
        };
        panel.run(&engine(), surah_cursor(1), 114);
        assert_eq!(panel.results.len(), 2);
        panel.select_previous();
        assert_eq!(panel.selected, 0);
        panel.select_next();
        panel.select_next();
        assert_eq!(panel.selected, 1);
        assert_eq!(panel.selected_ayah(), Some(3));
    }

    #[test]
    fn test_result_line_truncates() {
        let result = SearchMatch {
            absolute_verse_number: 7,
            surah_name: "الفاتحة".to_string(),
            number_in_surah: 7,
            text: fixture::FATIHA[6].to_string(),
        };
        let line = result_line(&result);
        assert!(line.starts_with("الفاتحة - 7: "));
        assert!(line.ends_with("..."));
    }
}
