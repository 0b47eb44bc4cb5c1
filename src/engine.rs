use crate::context::RequestContext;
use crate::header_builder::{HeaderBuilder, OriginOutcome};
use crate::headers::HeaderCollection;
use crate::policy::PolicyConfig;
use crate::result::{CorsDecision, PreflightResult, RejectedResult, SimpleResult};

/// Core CORS policy engine that evaluates requests against a [`PolicyConfig`].
///
/// The engine is a pure function of its policy and the request, so a single
/// instance can be shared across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CorsEngine {
    policy: PolicyConfig,
}

impl CorsEngine {
    pub fn new(policy: PolicyConfig) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn check(&self, request: &RequestContext<'_>) -> CorsDecision {
        let Some(origin) = request.origin else {
            return CorsDecision::Passthrough;
        };

        let builder = HeaderBuilder::new(&self.policy);
        let origin_headers = match builder.build_origin_headers(origin) {
            OriginOutcome::Allow(headers) => headers,
            OriginOutcome::Disallow(headers) => {
                return CorsDecision::Rejected(RejectedResult {
                    headers: headers.into_headers(),
                    short_circuit: self.policy.reject_unallowed_origins,
                });
            }
        };

        if request.is_preflight() {
            CorsDecision::Preflight(self.process_preflight(&builder, origin_headers, request))
        } else {
            CorsDecision::Simple(self.process_simple(&builder, origin_headers))
        }
    }

    fn process_preflight(
        &self,
        builder: &HeaderBuilder<'_>,
        origin_headers: HeaderCollection,
        request: &RequestContext<'_>,
    ) -> PreflightResult {
        let mut headers = HeaderCollection::with_estimate(6);
        headers.extend(origin_headers);
        headers.extend(builder.build_credentials_header());
        headers.extend(builder.build_methods_header());
        headers.extend(builder.build_allowed_headers(request));
        headers.extend(builder.build_max_age_header());

        PreflightResult {
            headers: headers.into_headers(),
            status: self.policy.options_success_status,
        }
    }

    fn process_simple(
        &self,
        builder: &HeaderBuilder<'_>,
        origin_headers: HeaderCollection,
    ) -> SimpleResult {
        let mut headers = HeaderCollection::with_estimate(4);
        headers.extend(origin_headers);
        headers.extend(builder.build_credentials_header());
        headers.extend(builder.build_exposed_headers());

        SimpleResult {
            headers: headers.into_headers(),
        }
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;
