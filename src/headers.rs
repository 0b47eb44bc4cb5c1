use crate::constants::header;
use crate::util::split_list;
use indexmap::IndexMap;

/// Response headers produced by the engine, in emission order.
pub type Headers = IndexMap<String, String>;

/// Accumulates engine headers. `Vary` tokens are kept apart and rendered as a
/// single de-duplicated line when the collection is finished.
#[derive(Debug, Default, Clone)]
pub(crate) struct HeaderCollection {
    headers: Headers,
    vary: Vec<String>,
}

impl HeaderCollection {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_estimate(estimate: usize) -> Self {
        Self {
            headers: IndexMap::with_capacity(estimate),
            vary: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, name: &str, value: String) {
        if name.eq_ignore_ascii_case(header::VARY) {
            self.add_vary(&value);
        } else {
            self.headers.insert(name.to_string(), value);
        }
    }

    /// Accepts a single token or a comma separated line.
    pub(crate) fn add_vary(&mut self, value: &str) {
        for token in split_list(value) {
            if !self.vary.iter().any(|seen| seen.eq_ignore_ascii_case(token)) {
                self.vary.push(token.to_string());
            }
        }
    }

    pub(crate) fn extend(&mut self, other: HeaderCollection) {
        self.headers.extend(other.headers);
        for token in &other.vary {
            self.add_vary(token);
        }
    }

    pub(crate) fn into_headers(mut self) -> Headers {
        if !self.vary.is_empty() {
            self.headers
                .insert(header::VARY.to_string(), self.vary.join(", "));
        }
        self.headers
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
