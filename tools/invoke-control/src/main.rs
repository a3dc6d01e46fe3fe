use std::{
    sync::OnceLock,
    time::{Duration, Instant},
};

use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    CLIENT
        .set(
            reqwest::Client::builder()
                .timeout(Duration::from_secs(1))
                .build()?,
        )
        .unwrap();
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:10000".into());
    invoke_session(&url).await
}

static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

async fn invoke_session(url: &str) -> anyhow::Result<()> {
    let client = CLIENT.get().unwrap();
    client.get(format!("{url}/ok")).send().await?.error_for_status()?;
    for payload in [
        json!({"a": 4, "b": 2, "op": "add"}),
        json!({"a": 10, "b": 4, "op": "sub"}),
        json!({"a": 3, "b": 3, "op": "mul"}),
        json!({"a": 1, "b": 0, "op": "div"}),
    ] {
        let start = Instant::now();
        let result = client
            .post(format!("{url}/invoke"))
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;
        println!("{payload} -> {result} ({:?})", start.elapsed());
    }
    let status = client
        .post(format!("{url}/invoke"))
        .body(r#"{"a": 1, "b": 2, "op": "mod"}"#)
        .send()
        .await?
        .status();
    anyhow::ensure!(
        status == reqwest::StatusCode::BAD_REQUEST,
        "malformed invocation got {status}"
    );
    println!("malformed invocation rejected ({status})");
    Ok(())
}
