//! CORS that only intercepts real preflights.
//!
//! `tower_http::cors::Cors` answers every `OPTIONS` request itself. Resources that serve
//! `OPTIONS` (e.g. to advertise `Allow`) need plain `OPTIONS` requests routed through, so
//! only requests carrying both `Origin` and `Access-Control-Request-Method` are treated as
//! preflights here.

use std::{
    future::Future,
    pin::Pin,
    task::{ready, Context, Poll},
};

use axum::http::{header, HeaderMap, Method, Request, Response};
use tower::{Layer, Service};
use tower_http::cors::{Cors, CorsLayer};

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Whether `headers` describe a CORS preflight.
pub fn is_preflight(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

#[derive(Clone)]
pub struct PreflightOnlyLayer {
    cors: CorsLayer,
}

impl PreflightOnlyLayer {
    pub fn new(cors: CorsLayer) -> Self {
        Self { cors }
    }
}

impl<S: Clone> Layer<S> for PreflightOnlyLayer {
    type Service = PreflightOnly<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PreflightOnly {
            cors: self.cors.layer(inner.clone()),
            inner,
        }
    }
}

#[derive(Clone)]
pub struct PreflightOnly<S> {
    cors: Cors<S>,
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for PreflightOnly<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    S::Error: 'static,
    ResBody: Default + Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        ready!(self.inner.poll_ready(cx))?;
        self.cors.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        if request.method() == Method::OPTIONS
            && !is_preflight(request.method(), request.headers())
        {
            Box::pin(self.inner.call(request))
        } else {
            Box::pin(self.cors.call(request))
        }
    }
}
