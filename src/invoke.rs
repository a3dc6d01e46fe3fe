use bytes::Bytes;
use derive_more::From;
use tokio::sync::{mpsc, oneshot};

pub type Payload = Bytes;

pub type Outcome = crate::Result<Vec<u8>>;

/// Single-resolution reply slot of one invocation. Resolving consumes it, so
/// the terminal signal cannot fire twice.
#[derive(Debug, From)]
pub struct Promise(oneshot::Sender<Outcome>);

impl Promise {
    pub fn resolve(self, outcome: Outcome) -> crate::Result<()> {
        self.0
            .send(outcome)
            .map_err(|_| crate::err!("unexpected reply channel closing"))
    }
}

#[derive(Debug, Clone, From)]
pub struct Handle(mpsc::UnboundedSender<(Payload, Promise)>);

impl Handle {
    /// Submit one invocation and wait for its outcome. The outer error means
    /// the function session is gone; the inner [`Outcome`] is the result of
    /// the invocation itself.
    pub async fn invoke(&self, payload: Payload) -> crate::Result<Outcome> {
        let chan = oneshot::channel();
        self.0
            .send((payload, Promise(chan.0)))
            .map_err(|_| crate::err!("unexpected function session closing"))?;
        Ok(chan.1.await?)
    }
}

#[derive(Debug, From)]
pub struct Source(mpsc::UnboundedReceiver<(Payload, Promise)>);

impl Source {
    pub async fn option_next(&mut self) -> Option<(Payload, Promise)> {
        self.0.recv().await
    }
}

pub fn invoke_channel() -> (Handle, Source) {
    let chan = mpsc::unbounded_channel();
    (Handle(chan.0), Source(chan.1))
}
