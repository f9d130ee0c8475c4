//! Access log for requests that made it past authentication

use axum::{extract::Request, middleware::Next, response::Response};

use crate::identity::RequestContext;
use crate::logging::AUDIT_TARGET;

/// Log the client and requested path, then always forward to `next`
pub async fn access_log(request: Request, next: Next) -> Response {
    let context = RequestContext::from_request(&request);
    tracing::info!(
        target: AUDIT_TARGET,
        "[{}] file access - path: {}",
        context.client,
        context.path
    );
    next.run(request).await
}
