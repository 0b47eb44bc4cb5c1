use indexmap::IndexSet;
use std::fmt;
use std::sync::Arc;

pub type OriginPredicateFn = dyn Fn(&str) -> bool + Send + Sync;

/// Which request origins the policy accepts.
#[derive(Clone)]
pub enum AllowedOrigins {
    /// Any origin is accepted and answered with `*`.
    Any,
    /// Any origin is accepted and echoed back, so credentials remain usable.
    Reflect,
    /// Exact, case-sensitive membership. Ports and subdomains are distinct origins.
    List(IndexSet<String>),
    /// Per-origin decision delegated to a caller-supplied function.
    Predicate(Arc<OriginPredicateFn>),
}

/// Outcome of matching a request origin against [`AllowedOrigins`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginDecision {
    /// Matched by the wildcard.
    Any,
    /// Matched a specific entry, the predicate, or a reflecting policy.
    Mirror,
    Disallow,
}

impl Default for AllowedOrigins {
    fn default() -> Self {
        Self::List(IndexSet::new())
    }
}

impl AllowedOrigins {
    pub fn any() -> Self {
        Self::Any
    }

    pub fn reflect() -> Self {
        Self::Reflect
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    pub fn resolve(&self, origin: &str) -> OriginDecision {
        match self {
            Self::Any => OriginDecision::Any,
            Self::Reflect => OriginDecision::Mirror,
            Self::List(values) => {
                if values.contains(origin) {
                    OriginDecision::Mirror
                } else {
                    OriginDecision::Disallow
                }
            }
            Self::Predicate(predicate) => {
                if predicate(origin) {
                    OriginDecision::Mirror
                } else {
                    OriginDecision::Disallow
                }
            }
        }
    }

    /// A wildcard response is identical for every origin, so only the
    /// other variants make the response depend on `Origin`.
    pub fn varies_by_origin(&self) -> bool {
        !self.is_any()
    }
}

impl fmt::Debug for AllowedOrigins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Reflect => f.write_str("Reflect"),
            Self::List(values) => f.debug_tuple("List").field(values).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
