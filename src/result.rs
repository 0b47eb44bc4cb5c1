use crate::headers::Headers;

/// Headers and status for a preflight the engine answers itself.
#[derive(Debug, Clone)]
pub struct PreflightResult {
    pub headers: Headers,
    pub status: u16,
}

/// Headers to merge into the route handler's response.
#[derive(Debug, Clone)]
pub struct SimpleResult {
    pub headers: Headers,
}

/// Verdict for an origin outside the policy.
///
/// `headers` carries at most `Vary: Origin`. When `short_circuit` is set the
/// handler must not run and the caller answers `403`.
#[derive(Debug, Clone)]
pub struct RejectedResult {
    pub headers: Headers,
    pub short_circuit: bool,
}

/// Overall decision returned by the policy engine.
#[derive(Debug, Clone)]
pub enum CorsDecision {
    /// No `Origin` header; not a CORS request.
    Passthrough,
    Rejected(RejectedResult),
    Preflight(PreflightResult),
    Simple(SimpleResult),
}

impl CorsDecision {
    /// Short label used in request logs.
    pub fn label(&self) -> &'static str {
        match self {
            CorsDecision::Passthrough => "passthrough",
            CorsDecision::Rejected(_) => "rejected",
            CorsDecision::Preflight(_) => "preflight",
            CorsDecision::Simple(_) => "simple",
        }
    }
}
