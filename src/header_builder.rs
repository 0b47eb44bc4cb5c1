use crate::allowed_headers::AllowedHeaders;
use crate::constants::header;
use crate::context::RequestContext;
use crate::headers::HeaderCollection;
use crate::origin::OriginDecision;
use crate::policy::PolicyConfig;

pub(crate) enum OriginOutcome {
    Allow(HeaderCollection),
    Disallow(HeaderCollection),
}

pub(crate) struct HeaderBuilder<'a> {
    policy: &'a PolicyConfig,
}

impl<'a> HeaderBuilder<'a> {
    pub(crate) fn new(policy: &'a PolicyConfig) -> Self {
        Self { policy }
    }

    pub(crate) fn build_origin_headers(&self, origin: &str) -> OriginOutcome {
        match self.policy.allowed_origins.resolve(origin) {
            // Credentialed responses may not use `*`, so the wildcard falls
            // back to echoing the request origin.
            OriginDecision::Any if !self.policy.allow_credentials => {
                let mut headers = HeaderCollection::with_estimate(1);
                headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_string());
                OriginOutcome::Allow(headers)
            }
            OriginDecision::Any | OriginDecision::Mirror => {
                let mut headers = HeaderCollection::with_estimate(2);
                headers.add_vary(header::ORIGIN);
                headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.to_string());
                OriginOutcome::Allow(headers)
            }
            OriginDecision::Disallow => {
                let mut headers = HeaderCollection::with_estimate(1);
                if self.policy.allowed_origins.varies_by_origin() {
                    headers.add_vary(header::ORIGIN);
                }
                OriginOutcome::Disallow(headers)
            }
        }
    }

    pub(crate) fn build_credentials_header(&self) -> HeaderCollection {
        if self.policy.allow_credentials {
            let mut headers = HeaderCollection::with_estimate(1);
            headers.push(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true".to_string());
            headers
        } else {
            HeaderCollection::new()
        }
    }

    pub(crate) fn build_methods_header(&self) -> HeaderCollection {
        if let Some(value) = self.policy.allowed_methods.header_value() {
            let mut headers = HeaderCollection::with_estimate(1);
            headers.push(header::ACCESS_CONTROL_ALLOW_METHODS, value);
            headers
        } else {
            HeaderCollection::new()
        }
    }

    pub(crate) fn build_allowed_headers(&self, request: &RequestContext<'_>) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(2);
        if matches!(self.policy.allowed_headers, AllowedHeaders::MirrorRequest) {
            headers.add_vary(header::ACCESS_CONTROL_REQUEST_HEADERS);
        }
        if let Some(value) = self
            .policy
            .allowed_headers
            .header_value(request.access_control_request_headers)
        {
            headers.push(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
        }
        headers
    }

    pub(crate) fn build_exposed_headers(&self) -> HeaderCollection {
        if let Some(value) = self.policy.exposed_headers.header_value() {
            let mut headers = HeaderCollection::with_estimate(1);
            headers.push(header::ACCESS_CONTROL_EXPOSE_HEADERS, value);
            headers
        } else {
            HeaderCollection::new()
        }
    }

    pub(crate) fn build_max_age_header(&self) -> HeaderCollection {
        if let Some(seconds) = self.policy.max_age {
            let mut headers = HeaderCollection::with_estimate(1);
            headers.push(header::ACCESS_CONTROL_MAX_AGE, seconds.to_string());
            headers
        } else {
            HeaderCollection::new()
        }
    }
}

#[cfg(test)]
#[path = "header_builder_test.rs"]
mod header_builder_test;
