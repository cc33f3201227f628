// Injury exclusion list. Loaded once at startup; every recommendation path
// consults it before suggesting a player.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryEntry {
    pub name: String,
    pub team: String,
    pub status: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InjuryList {
    #[serde(default, rename = "injuries")]
    entries: Vec<InjuryEntry>,
}

impl InjuryList {
    pub fn new(entries: Vec<InjuryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[InjuryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact (case-insensitive) match on a full player name, as reported by a
    /// sportsbook or the roster.
    pub fn lookup(&self, name: &str) -> Option<&InjuryEntry> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }
        self.entries.iter().find(|e| e.name.to_lowercase() == name)
    }

    /// Token-level match for free-text queries. Either the full name appears
    /// as consecutive words in the query, or the query is made only of the
    /// player's own name words and includes the surname. `"charbonnet"` and
    /// `"Zach Charbonnet rushing"` find `Zach Charbonnet`; `"char"` and
    /// `"Zach"` do not.
    pub fn matching(&self, query: &str) -> Option<&InjuryEntry> {
        let query = tokens(query);
        if query.is_empty() {
            return None;
        }
        self.entries.iter().find(|e| {
            let name = tokens(&e.name);
            let Some(surname) = name.last() else {
                return false;
            };
            let full_name = query.windows(name.len()).any(|w| w == name.as_slice());
            let own_words = query.iter().all(|t| name.contains(t)) && query.contains(surname);
            full_name || own_words
        })
    }

    pub fn is_out(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

/// Lowercased words with surrounding punctuation stripped. Inner hyphens and
/// apostrophes stay, so `Smith-Njigba` is one word.
fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}
