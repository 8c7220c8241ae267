//! Label matching for the search filter, using nucleo-matcher.

use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Case-insensitive substring matcher.
///
/// The trimmed query is matched as a single needle, inner whitespace
/// included.
pub struct LabelMatcher {
    atom: Option<Atom>,
    matcher: Matcher,
    buf: Vec<char>,
}

impl LabelMatcher {
    /// Build a matcher. A blank query matches every label.
    pub fn new(query: &str) -> Self {
        let query = query.trim();
        let atom = (!query.is_empty()).then(|| {
            Atom::new(
                query,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Substring,
                false,
            )
        });
        Self {
            atom,
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::new(),
        }
    }

    /// Check if `label` matches.
    pub fn matches(&mut self, label: &str) -> bool {
        let Some(atom) = &self.atom else {
            return true;
        };
        let haystack = Utf32Str::new(label, &mut self.buf);
        atom.score(haystack, &mut self.matcher).is_some()
    }
}

impl std::fmt::Debug for LabelMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelMatcher")
            .field("blank", &self.atom.is_none())
            .finish_non_exhaustive()
    }
}
