// file: src/models/search_result.rs
// description: keyword search hit returned by the store and the search endpoint

use crate::utils::Validator;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub paper_id: i64,
    pub title: String,
    pub authors: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

impl SearchResult {
    /// Format as a summary string for display
    pub fn format_summary(&self, max_abstract_len: usize) -> String {
        let preview = Validator::truncate_text(&self.abstract_text, max_abstract_len);

        format!(
            "[{}] {} ({})\n{}\n",
            self.paper_id, self.title, self.authors, preview
        )
    }
}
