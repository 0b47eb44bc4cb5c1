use crate::util::normalize_lower;
use indexmap::IndexSet;

/// Configuration for the `Access-Control-Allow-Headers` response value.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum AllowedHeaders {
    List(Vec<String>),
    /// Echo whatever the browser listed in `Access-Control-Request-Headers`.
    #[default]
    MirrorRequest,
}

impl AllowedHeaders {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = IndexSet::new();
        let mut deduped: Vec<String> = Vec::new();
        for value in values {
            let trimmed = value.into().trim().to_string();
            if trimmed.is_empty() {
                continue;
            }
            if seen.insert(normalize_lower(&trimmed)) {
                deduped.push(trimmed);
            }
        }

        Self::List(deduped)
    }

    pub fn mirror_request() -> Self {
        Self::MirrorRequest
    }

    /// Header value for a preflight, given the request's
    /// `Access-Control-Request-Headers` line.
    pub fn header_value(&self, requested: Option<&str>) -> Option<String> {
        match self {
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => Some(values.join(", ")),
            Self::MirrorRequest => requested
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
#[path = "allowed_headers_test.rs"]
mod allowed_headers_test;
