use std::sync::Arc;

use calc::{
    app,
    host::{self, HostState},
    invoke::invoke_channel,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

async fn start_host() -> calc::Result<String> {
    let (handle, source) = invoke_channel();
    let state = Arc::new(HostState {
        function: handle,
        shutdown: CancellationToken::new(),
    });
    let router = host::route(state);
    let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
    let url = format!("http://{}", listener.local_addr()?);
    tokio::spawn(app::session(source));
    tokio::spawn(async move { axum::serve(listener, router).await });
    Ok(url)
}

#[tokio::test]
async fn ok_route() -> calc::Result<()> {
    let url = start_host().await?;
    reqwest::Client::new()
        .get(format!("{url}/ok"))
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

#[tokio::test]
async fn invoke_every_op() -> calc::Result<()> {
    let url = start_host().await?;
    let client = reqwest::Client::new();
    for (payload, expected) in [
        (r#"{"a": 4, "b": 2, "op": "add"}"#, json!({"result": 6.0})),
        (r#"{"a": 10, "b": 4, "op": "sub"}"#, json!({"result": 6.0})),
        (r#"{"a": 3, "b": 3, "op": "mul"}"#, json!({"result": 9.0})),
        (r#"{"a": 4, "b": 2, "op": "div"}"#, json!({"result": 2.0})),
    ] {
        let response = client
            .post(format!("{url}/invoke"))
            .body(payload)
            .send()
            .await?
            .error_for_status()?;
        assert_eq!(
            response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(response.json::<serde_json::Value>().await?, expected)
    }
    Ok(())
}

#[tokio::test]
async fn invoke_div_by_zero() -> calc::Result<()> {
    let url = start_host().await?;
    let response = reqwest::Client::new()
        .post(format!("{url}/invoke"))
        .body(r#"{"a": 1, "b": 0, "op": "div"}"#)
        .send()
        .await?
        .error_for_status()?;
    // non-finite result encodes as null on the wire
    assert_eq!(
        response.json::<serde_json::Value>().await?,
        json!({"result": null})
    );
    Ok(())
}

#[tokio::test]
async fn reject_bad_request() -> calc::Result<()> {
    let url = start_host().await?;
    let client = reqwest::Client::new();
    for payload in [
        r#"{"a": 1, "b": 2, "op": "mod"}"#,
        r#"{"a": 1, "op": "add"}"#,
        r#"[1, 2]"#,
    ] {
        let response = client
            .post(format!("{url}/invoke"))
            .body(payload)
            .send()
            .await?;
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST)
    }
    // rejected invocations leave the session serving
    let response = client
        .post(format!("{url}/invoke"))
        .body(r#"{"a": 10, "b": 4, "op": "sub"}"#)
        .send()
        .await?
        .error_for_status()?;
    assert_eq!(
        response.json::<serde_json::Value>().await?,
        json!({"result": 6.0})
    );
    Ok(())
}
