use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio_util::sync::CancellationToken;

use crate::invoke;

#[derive(Debug)]
pub struct HostState {
    pub function: invoke::Handle,
    pub shutdown: CancellationToken,
}

type Host = State<Arc<HostState>>;

pub fn route(state: Arc<HostState>) -> Router {
    Router::new()
        .route("/ok", get(|| async {}))
        .route("/invoke", post(invoke))
        .with_state(state)
}

async fn invoke(State(state): Host, payload: Bytes) -> Response {
    match state.function.invoke(payload).await {
        Ok(Ok(result)) => {
            ([(header::CONTENT_TYPE, "application/json")], result).into_response()
        }
        Ok(Err(err)) => {
            tracing::warn!("bad request: {err:#}");
            (StatusCode::BAD_REQUEST, format!("{err:#}")).into_response()
        }
        Err(err) => {
            // function session gone, nothing left to serve
            state.shutdown.cancel();
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}")).into_response()
        }
    }
}
