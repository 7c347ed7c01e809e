//! Content search DTOs.
//!
//! Used by: SearchPanel to list matches and highlight `match_text` in context.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub path: String,
    /// Line number of the match (1-indexed)
    pub line_number: usize,
    /// Line before (if any), the matched line, line after (if any)
    pub context: Vec<String>,
    /// Matched substring with its original casing
    pub match_text: String,
}
