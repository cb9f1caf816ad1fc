use {
    super::Router,
    crate::{Error, ErrorKind, Request, ResponseWriter},
    bytes::Bytes,
    http_body::Body,
    http_body_util::{BodyExt, Full},
    std::{
        convert::Infallible,
        future::Future,
        pin::Pin,
        sync::Arc,
        task::{Context, Poll},
    },
};

/// A frozen [`Router`] behind a `tower::Service`.
///
/// The request body is buffered before dispatch. A body that fails to read is
/// answered with a `400` JSON error; the service itself never fails, so it
/// plugs into servers that require infallible services, e.g.
/// `axum::Router::fallback_service`.
#[derive(Debug, Clone)]
pub struct RouterService {
    router: Arc<Router>,
}

impl RouterService {
    pub(crate) fn new(router: Router) -> Self {
        Self {
            router: Arc::new(router),
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}

impl<B> tower::Service<http::Request<B>> for RouterService
where
    B: Body + Send + 'static,
    B::Data: Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    type Response = http::Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: http::Request<B>) -> Self::Future {
        let router = self.router.clone();
        Box::pin(async move {
            let (parts, body) = request.into_parts();
            let body = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(e) => {
                    return Ok(Error::new(ErrorKind::InvalidRequest, e).to_http_response());
                }
            };

            let mut req = Request::from_parts(parts, body);
            let mut w = ResponseWriter::new();
            router.dispatch(&mut req, &mut w);
            Ok(w.into_response())
        })
    }
}
