use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::exposed_headers::ExposedHeaders;
use crate::origin::AllowedOrigins;
use crate::util::is_http_token;
use thiserror::Error;

/// Immutable CORS policy, built once at startup and handed to
/// [`CorsEngine`](crate::CorsEngine).
#[derive(Clone, Debug)]
pub struct PolicyConfig {
    pub allowed_origins: AllowedOrigins,
    pub allowed_methods: AllowedMethods,
    pub allowed_headers: AllowedHeaders,
    pub exposed_headers: ExposedHeaders,
    pub allow_credentials: bool,
    pub max_age: Option<u64>,
    pub options_success_status: u16,
    /// Answer rejected origins with `403` instead of running the handler.
    pub reject_unallowed_origins: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            allowed_origins: AllowedOrigins::default(),
            allowed_methods: AllowedMethods::default(),
            allowed_headers: AllowedHeaders::default(),
            exposed_headers: ExposedHeaders::default(),
            allow_credentials: false,
            max_age: None,
            options_success_status: 204,
            reject_unallowed_origins: false,
        }
    }
}

/// A policy that browsers would refuse or that cannot be rendered as headers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "allowCredentials cannot be combined with a wildcard origin; list the permitted origins explicitly"
    )]
    CredentialsWithWildcardOrigin,
    #[error("allowed method `{0}` is not a valid HTTP method token")]
    InvalidMethod(String),
    #[error("header name `{0}` is not a valid HTTP header name")]
    InvalidHeaderName(String),
    #[error("allowed origins must not contain empty values")]
    EmptyOrigin,
    #[error("optionsSuccessStatus {0} is not a 2xx status code")]
    InvalidSuccessStatus(u16),
}

impl PolicyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allowed_origins(mut self, origins: AllowedOrigins) -> Self {
        self.allowed_origins = origins;
        self
    }

    pub fn allowed_methods(mut self, methods: AllowedMethods) -> Self {
        self.allowed_methods = methods;
        self
    }

    pub fn allowed_headers(mut self, headers: AllowedHeaders) -> Self {
        self.allowed_headers = headers;
        self
    }

    pub fn exposed_headers(mut self, headers: ExposedHeaders) -> Self {
        self.exposed_headers = headers;
        self
    }

    pub fn allow_credentials(mut self, enabled: bool) -> Self {
        self.allow_credentials = enabled;
        self
    }

    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn options_success_status(mut self, status: u16) -> Self {
        self.options_success_status = status;
        self
    }

    pub fn reject_unallowed_origins(mut self, enabled: bool) -> Self {
        self.reject_unallowed_origins = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.allow_credentials && self.allowed_origins.is_any() {
            return Err(ValidationError::CredentialsWithWildcardOrigin);
        }

        if let AllowedOrigins::List(values) = &self.allowed_origins
            && values.iter().any(|origin| origin.trim().is_empty())
        {
            return Err(ValidationError::EmptyOrigin);
        }

        if let Some(method) = self
            .allowed_methods
            .values()
            .iter()
            .find(|method| !is_http_token(method))
        {
            return Err(ValidationError::InvalidMethod(method.clone()));
        }

        if let AllowedHeaders::List(values) = &self.allowed_headers
            && let Some(name) = values.iter().find(|name| !is_http_token(name))
        {
            return Err(ValidationError::InvalidHeaderName(name.clone()));
        }

        if let Some(name) = self.exposed_headers.iter().find(|name| !is_http_token(name)) {
            return Err(ValidationError::InvalidHeaderName(name.clone()));
        }

        if !(200..=299).contains(&self.options_success_status) {
            return Err(ValidationError::InvalidSuccessStatus(
                self.options_success_status,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
