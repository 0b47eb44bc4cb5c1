use std::convert::Infallible;
use std::future::{Ready, ready};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::service::Service;
use hyper::{Method, Request, Response, StatusCode};

use crate::constants::INDEX_BODY;
use crate::service::Body;

const HTML: &str = "text/html; charset=utf-8";
const PLAIN: &str = "text/plain; charset=utf-8";

/// The server's only route: `GET /` (and `HEAD /`).
#[derive(Clone, Copy, Debug, Default)]
pub struct Routes;

impl<B> Service<Request<B>> for Routes {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, req: Request<B>) -> Self::Future {
        let response = match (req.method(), req.uri().path()) {
            (&Method::GET | &Method::HEAD, "/") => index(),
            _ => not_found(),
        };

        ready(Ok(response))
    }
}

fn index() -> Response<Body> {
    text_response(StatusCode::OK, HTML, INDEX_BODY)
}

fn not_found() -> Response<Body> {
    text_response(StatusCode::NOT_FOUND, PLAIN, "Not Found")
}

fn text_response(
    status: StatusCode,
    content_type: &'static str,
    body: &'static str,
) -> Response<Body> {
    let mut response = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;
