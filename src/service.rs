//! Hyper middleware that applies [`CorsEngine`] decisions around an inner
//! route service, following the layering from hyper's
//! [server middleware guide](https://hyper.rs/guides/1/server/middleware/).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderMap, HeaderName, HeaderValue, VARY};
use hyper::service::Service;
use hyper::{Request, Response, StatusCode};
use tracing::{debug, warn};

use crate::constants::header;
use crate::context::RequestContext;
use crate::engine::CorsEngine;
use crate::headers::Headers;
use crate::result::CorsDecision;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

pub type Body = Full<Bytes>;

#[derive(Clone)]
pub struct CorsService<S> {
    inner: S,
    engine: Arc<CorsEngine>,
}

impl<S> CorsService<S> {
    pub fn new(engine: Arc<CorsEngine>, inner: S) -> Self {
        Self { inner, engine }
    }
}

impl<S, B> Service<Request<B>> for CorsService<S>
where
    S: Service<Request<B>, Response = Response<Body>>,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn call(&self, req: Request<B>) -> Self::Future {
        let decision = {
            let ctx = request_context(&req);
            let decision = self.engine.check(&ctx);
            debug!(
                method = %req.method(),
                path = req.uri().path(),
                origin = ctx.origin.unwrap_or("-"),
                verdict = decision.label(),
                "cors decision"
            );
            decision
        };

        match decision {
            CorsDecision::Passthrough => Box::pin(self.inner.call(req)),
            CorsDecision::Preflight(result) => {
                let status = StatusCode::from_u16(result.status).unwrap_or_else(|_| {
                    warn!(status = result.status, "invalid preflight status, using 204");
                    StatusCode::NO_CONTENT
                });
                let response = empty_response(status, &result.headers);
                Box::pin(async move { Ok(response) })
            }
            CorsDecision::Rejected(result) if result.short_circuit => {
                let response = empty_response(StatusCode::FORBIDDEN, &result.headers);
                Box::pin(async move { Ok(response) })
            }
            CorsDecision::Rejected(result) => with_headers(self.inner.call(req), result.headers),
            CorsDecision::Simple(result) => with_headers(self.inner.call(req), result.headers),
        }
    }
}

fn with_headers<F, E>(future: F, headers: Headers) -> BoxFuture<Result<Response<Body>, E>>
where
    F: Future<Output = Result<Response<Body>, E>> + Send + 'static,
    E: 'static,
{
    Box::pin(async move {
        let mut response = future.await?;
        apply_headers(response.headers_mut(), &headers);
        Ok(response)
    })
}

fn empty_response(status: StatusCode, headers: &Headers) -> Response<Body> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    apply_headers(response.headers_mut(), headers);
    response
}

/// Copies engine headers onto a response. `Vary` is appended so entries set
/// by the handler survive; everything else replaces.
fn apply_headers(map: &mut HeaderMap, headers: &Headers) {
    for (name, value) in headers {
        let (Ok(header_name), Ok(header_value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) else {
            warn!(header = %name, "skipping CORS header that is not representable");
            continue;
        };

        if header_name == VARY {
            map.append(header_name, header_value);
        } else {
            map.insert(header_name, header_value);
        }
    }
}

fn request_context<B>(request: &Request<B>) -> RequestContext<'_> {
    let headers = request.headers();

    RequestContext {
        method: request.method().as_str(),
        origin: header_value(headers, header::ORIGIN),
        access_control_request_method: header_value(
            headers,
            header::ACCESS_CONTROL_REQUEST_METHOD,
        ),
        access_control_request_headers: header_value(
            headers,
            header::ACCESS_CONTROL_REQUEST_HEADERS,
        ),
    }
}

/// Header values that are not visible ASCII are treated as absent.
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;
