//! Inline `key:value` operators inside free-text search.

use std::sync::LazyLock;

use regex::Regex;

/// `type:` and `source:` followed by an ASCII word. No leading word boundary:
/// `subtype:news` still yields `type:news`.
static RE_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(type|source):([A-Za-z0-9_]+)").unwrap());

/// Free text split into structural operators and the remaining query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOperators {
    /// Values of every `type:` operator, in order of appearance.
    pub types: Vec<String>,
    /// Values of every `source:` operator, in order of appearance.
    pub sources: Vec<String>,
    /// The search text with operator substrings removed.
    ///
    /// Each removal strips the first occurrence of the matched operator and
    /// trims the ends, so text with no operators comes back untouched.
    pub clean_query: String,
}

impl SearchOperators {
    pub fn parse(search_text: &str) -> Self {
        let mut ops = SearchOperators {
            clean_query: search_text.to_string(),
            ..Default::default()
        };

        for caps in RE_OPERATOR.captures_iter(search_text) {
            let value = caps[2].to_string();
            match &caps[1] {
                "type" => ops.types.push(value),
                _ => ops.sources.push(value),
            }
            ops.clean_query = ops.clean_query.replacen(&caps[0], "", 1).trim().to_string();
        }

        ops
    }

    pub fn has_type(&self) -> bool {
        !self.types.is_empty()
    }

    pub fn has_source(&self) -> bool {
        !self.sources.is_empty()
    }
}
