use regex::{Regex, RegexBuilder};

use super::model::Track;

/// Search predicate: the query as a case-insensitive literal, matched
/// against title, artist and lyrics.
#[derive(Debug, Clone, Default)]
pub struct TrackFilter {
    pattern: Option<Regex>,
}

impl TrackFilter {
    pub fn new(query: &str) -> Self {
        if query.is_empty() {
            return Self::default();
        }

        let pattern = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .map_err(|e| tracing::warn!(error = %e, "search text rejected; showing all rows"))
            .ok();
        Self { pattern }
    }

    pub fn matches(&self, track: &Track) -> bool {
        match &self.pattern {
            None => true,
            Some(re) => {
                re.is_match(&track.title) || re.is_match(&track.artist) || re.is_match(&track.lyrics)
            }
        }
    }
}
