//! RPC Metrics Middleware

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

use crate::infrastructure::metrics;
use crate::shared::error::ErrorKind;

/// Records count and latency of every matched RPC call.
///
/// The result code is the `ErrorKind` attached by `AppError`'s response, or
/// `OK` for successful calls.
pub async fn track_rpc_metrics(req: Request, next: Next) -> Response {
    let method = rpc_method_name(req.uri().path()).to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let code = match response.extensions().get::<ErrorKind>() {
        Some(kind) => kind.as_str(),
        None if response.status().is_success() => "OK",
        None => "UNKNOWN",
    };

    metrics::record_rpc(&method, code, start.elapsed().as_secs_f64());
    response
}

/// `/rpc/AddFriend` and `/AddFriend` both name `AddFriend`.
fn rpc_method_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
