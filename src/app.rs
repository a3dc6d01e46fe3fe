use serde::{Deserialize, Serialize};

use crate::invoke;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub a: f64,
    pub b: f64,
    pub op: Op,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub result: f64,
}

impl Request {
    pub fn evaluate(&self) -> Response {
        let result = match self.op {
            Op::Add => self.a + self.b,
            Op::Sub => self.a - self.b,
            Op::Mul => self.a * self.b,
            // zero divisor follows IEEE-754, not validated
            Op::Div => self.a / self.b,
        };
        Response { result }
    }
}

/// One invocation over encoded payloads: decode, compute, encode.
///
/// The only failure is a payload that does not decode into [`Request`].
/// Non-finite results encode as JSON `null`.
pub fn handle(payload: &[u8]) -> crate::Result<Vec<u8>> {
    let request = serde_json::from_slice::<Request>(payload)?;
    Ok(serde_json::to_vec(&request.evaluate())?)
}

/// The registered function: drains invocations until every handle is gone,
/// resolving each promise exactly once.
pub async fn session(mut source: invoke::Source) -> crate::Result<()> {
    while let Some((payload, promise)) = source.option_next().await {
        if promise.resolve(handle(&payload)).is_err() {
            tracing::warn!("invocation abandoned before reply")
        }
    }
    Ok(())
}
