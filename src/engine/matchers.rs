//! Trigger matchers
//!
//! Stateless predicates over a prompt or a list of file paths. Each returns
//! the evidence that fired so the caller can explain the match.

use super::pattern::{GlobPattern, IntentPattern};

/// Find the first keyword contained in the prompt, ignoring case
///
/// An empty keyword is contained in every prompt.
pub fn match_keyword<'k>(prompt: &str, keywords: &'k [String]) -> Option<&'k str> {
    if keywords.is_empty() {
        return None;
    }

    let prompt = prompt.to_lowercase();
    keywords
        .iter()
        .find(|keyword| prompt.contains(&keyword.to_lowercase()))
        .map(String::as_str)
}

/// Find the first intent pattern found anywhere in the prompt
pub fn match_intent<'p>(prompt: &str, patterns: &'p [IntentPattern]) -> Option<&'p IntentPattern> {
    patterns.iter().find(|pattern| pattern.is_match(prompt))
}

/// Find the first path that is included and not excluded
///
/// Exclusions are checked first and rule a path out entirely. Paths are
/// examined in order and the first included one wins.
pub fn match_paths<'f>(
    paths: &'f [String],
    include: &[GlobPattern],
    exclude: &[GlobPattern],
) -> Option<&'f str> {
    if include.is_empty() {
        return None;
    }

    paths
        .iter()
        .filter(|path| !exclude.iter().any(|glob| glob.is_match(path)))
        .find(|path| include.iter().any(|glob| glob.is_match(path)))
        .map(String::as_str)
}
