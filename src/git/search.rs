//! Filename and full-text search over the working tree.
//!
//! Both modes take their file list from the current-branch tree, so ignored
//! files never show up. Results are capped at [`MAX_RESULTS`].
//!
//! Filename scoring (query and path lowercased):
//! - 1000: query equals the full path
//! - 100: query is a substring of the path
//! - 50: query characters appear in the path in order
//!
//! Ties are broken by shorter path first.

use std::fs;
use std::time::Instant;

use crate::error::Result;
use crate::git::paths::working_path;
use crate::git::repository::LocalProvider;
use crate::models::SearchResult;

pub const MAX_RESULTS: usize = 50;

/// Bytes inspected when deciding whether a file is text.
const TEXT_SNIFF_LEN: usize = 8192;

impl LocalProvider {
    pub fn search_file_names(&self, query: &str) -> Result<Vec<String>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let query = query.to_lowercase();
        let files = self.get_tree("")?.file_paths();

        let mut matches: Vec<(String, u32)> = files
            .into_iter()
            .filter_map(|path| {
                let score = fuzzy_score(&query, &path.to_lowercase());
                (score > 0).then_some((path, score))
            })
            .collect();

        matches.sort_by(|(a_path, a_score), (b_path, b_score)| {
            b_score.cmp(a_score).then_with(|| a_path.len().cmp(&b_path.len()))
        });

        Ok(matches
            .into_iter()
            .take(MAX_RESULTS)
            .map(|(path, _)| path)
            .collect())
    }

    pub fn search_content(&self, query: &str) -> Result<Vec<SearchResult>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let needle = fold_case(query);
        let files = self.get_tree("")?.file_paths();
        let mut results = Vec::new();

        for path in files {
            if results.len() >= MAX_RESULTS {
                break;
            }

            let content = match fs::read(working_path(&self.root, &path)) {
                Ok(content) => content,
                Err(e) => {
                    tracing::debug!("Skipping unreadable {}: {}", path, e);
                    continue;
                }
            };
            if !is_text(&content) {
                continue;
            }

            let text = String::from_utf8_lossy(&content);
            search_lines(&path, &text, &needle, &mut results);
        }

        tracing::debug!(
            "Content search for {:?}: {} results in {:?}",
            query,
            results.len(),
            start.elapsed()
        );
        Ok(results)
    }
}

/// Score of `path` against `query`; both must already be lowercased. 0 means no match.
pub fn fuzzy_score(query: &str, path: &str) -> u32 {
    if query == path {
        return 1000;
    }
    if path.contains(query) {
        return 100;
    }

    let mut wanted = query.chars().peekable();
    for ch in path.chars() {
        if wanted.peek() == Some(&ch) {
            wanted.next();
        }
    }

    if wanted.peek().is_none() { 50 } else { 0 }
}

/// Empty files are text; otherwise the first 8 KiB must be NUL-free UTF-8.
pub fn is_text(content: &[u8]) -> bool {
    let sample = &content[..content.len().min(TEXT_SNIFF_LEN)];
    if sample.contains(&0) {
        return false;
    }

    match std::str::from_utf8(sample) {
        Ok(_) => true,
        // A multi-byte character cut off by the sample boundary is fine.
        Err(e) => e.error_len().is_none() && sample.len() == TEXT_SNIFF_LEN,
    }
}

fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Appends one result per matching line, stopping at [`MAX_RESULTS`].
fn search_lines(path: &str, text: &str, needle: &str, results: &mut Vec<SearchResult>) {
    let lines: Vec<&str> = text.lines().collect();

    for (idx, line) in lines.iter().enumerate() {
        if results.len() >= MAX_RESULTS {
            return;
        }
        let Some(match_text) = find_ignore_case(line, needle) else {
            continue;
        };

        let before = idx.checked_sub(1).map(|i| lines[i]);
        let after = lines.get(idx + 1).copied();
        let context = before
            .into_iter()
            .chain(std::iter::once(*line))
            .chain(after)
            .map(str::to_string)
            .collect();

        results.push(SearchResult {
            path: path.to_string(),
            line_number: idx + 1,
            context,
            match_text: match_text.to_string(),
        });
    }
}

/// First slice of `line` whose lowercase form equals `needle` (already folded).
///
/// Matches whole characters only: a character that lowercases to several
/// chars (`İ` → `i̇`) never matches just a prefix of its folding.
fn find_ignore_case<'a>(line: &'a str, needle: &str) -> Option<&'a str> {
    for (start, _) in line.char_indices() {
        let mut folded = String::new();

        for (offset, ch) in line[start..].char_indices() {
            folded.extend(ch.to_lowercase());
            if !needle.starts_with(folded.as_str()) {
                break;
            }
            if folded.len() == needle.len() {
                return Some(&line[start..start + offset + ch.len_utf8()]);
            }
        }
    }
    None
}
