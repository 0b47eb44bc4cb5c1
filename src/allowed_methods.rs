use crate::constants::method;
use crate::util::normalize_lower;
use indexmap::IndexSet;

/// Methods advertised in `Access-Control-Allow-Methods`.
///
/// Order follows configuration and duplicates are dropped case-insensitively.
/// The original casing is kept so the header mirrors what the operator wrote.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AllowedMethods {
    values: Vec<String>,
}

impl AllowedMethods {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = IndexSet::new();
        let mut deduped = Vec::new();
        for value in values {
            let trimmed = value.into().trim().to_string();
            if trimmed.is_empty() {
                continue;
            }
            if seen.insert(normalize_lower(&trimmed)) {
                deduped.push(trimmed);
            }
        }

        Self { values: deduped }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn header_value(&self) -> Option<String> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.join(", "))
        }
    }
}

impl Default for AllowedMethods {
    fn default() -> Self {
        Self::list([method::GET, method::HEAD, method::POST])
    }
}

#[cfg(test)]
#[path = "allowed_methods_test.rs"]
mod allowed_methods_test;
