/// Lowercased name used as the filter key of a card. Missing names key as "".
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Case-insensitive substring filter over card names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    term: String,
}

impl NameFilter {
    pub fn new(term: &str) -> Self {
        Self {
            term: term.to_lowercase(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        name_key(name).contains(&self.term)
    }
}
