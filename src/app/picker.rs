use crate::backend::PatternOption;

/// Searchable multi-select over the pattern catalog. Options keep catalog
/// order; selections keep the order they were made in.
#[derive(Debug, Clone, Default)]
pub struct PatternPicker {
    options: Vec<PatternOption>,
    selected: Vec<String>,
    pub search: String,
}

impl PatternPicker {
    pub fn new(options: Vec<PatternOption>) -> Self {
        Self {
            options,
            selected: Vec::new(),
            search: String::new(),
        }
    }

    pub fn options(&self) -> &[PatternOption] {
        &self.options
    }

    pub fn selected_keys(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.iter().any(|k| k == key)
    }

    pub fn select(&mut self, key: &str) {
        if self.is_selected(key) || !self.options.iter().any(|o| o.key == key) {
            return;
        }
        self.selected.push(key.to_string());
    }

    pub fn remove(&mut self, key: &str) {
        self.selected.retain(|k| k != key);
    }

    pub fn toggle(&mut self, key: &str) {
        if self.is_selected(key) {
            self.remove(key);
        } else {
            self.select(key);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.search.clear();
    }

    pub fn label_for(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.key == key)
            .map(|o| o.label.as_str())
    }

    /// Unselected options whose label or key contains the search text.
    pub fn matching(&self) -> Vec<&PatternOption> {
        let needle = self.search.trim().to_lowercase();
        self.options
            .iter()
            .filter(|o| !self.is_selected(&o.key))
            .filter(|o| {
                needle.is_empty()
                    || o.label.to_lowercase().contains(&needle)
                    || o.key.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
