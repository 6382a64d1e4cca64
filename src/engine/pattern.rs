//! Compiled trigger patterns
//!
//! Intent patterns are case-insensitive regexes. Path patterns use a
//! restricted glob syntax (`**` crosses directories, `*` stays inside one
//! segment, everything else is literal) translated to an anchored regex.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

static GLOB_WILDCARD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*|\*").unwrap());

/// Why a configured pattern could not be used
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("glob pattern is empty")]
    EmptyGlob,

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// Translate a glob into an anchored regex source
pub fn glob_to_regex(glob: &str) -> Result<String, PatternError> {
    if glob.is_empty() {
        return Err(PatternError::EmptyGlob);
    }

    let mut source = String::with_capacity(glob.len() * 2 + 2);
    source.push('^');

    let mut literal_start = 0;
    for wildcard in GLOB_WILDCARD.find_iter(glob) {
        source.push_str(&regex::escape(&glob[literal_start..wildcard.start()]));
        source.push_str(if wildcard.as_str() == "**" {
            ".*"
        } else {
            "[^/]*"
        });
        literal_start = wildcard.end();
    }
    source.push_str(&regex::escape(&glob[literal_start..]));
    source.push('$');

    Ok(source)
}

/// A compiled prompt intent pattern
#[derive(Debug, Clone)]
pub struct IntentPattern {
    source: String,
    regex: Regex,
}

impl IntentPattern {
    pub fn compile(source: &str) -> Result<Self, PatternError> {
        let regex = RegexBuilder::new(source).case_insensitive(true).build()?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as configured
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Search anywhere in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// A compiled file path glob
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    pub fn compile(glob: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(&glob_to_regex(glob)?)?;
        Ok(Self {
            source: glob.to_string(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Match against the whole path
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}
