use std::sync::Arc;

use calc::{
    app,
    host::{self, HostState},
    invoke::invoke_channel,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> calc::Result<()> {
    tracing_subscriber::fmt::init();
    let port = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("10000")
        .parse::<u16>()?;

    let (handle, source) = invoke_channel();
    let state = Arc::new(HostState {
        function: handle,
        shutdown: CancellationToken::new(),
    });
    let shutdown = state.shutdown.clone();
    let router = host::route(state);
    let session = tokio::spawn(app::session(source));
    let signal_task = tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            let result = tokio::signal::ctrl_c().await;
            shutdown.cancel();
            result
        }
    });

    // select! wants a Future while axum::serve only gives IntoFuture, hence
    // the extra async wrapper
    let serve = async {
        let listener = TcpListener::bind(("0.0.0.0", port)).await?;
        tracing::info!("function host listening on {}", listener.local_addr()?);
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.clone().cancelled_owned())
            .await
    };
    tokio::select! {
        result = serve => result?,
        result = session => result??,
        result = signal_task => result??,
    }
    Ok(())
}
