pub mod app;
pub mod host;
pub mod invoke;

pub use anyhow::{anyhow as err, bail, Error, Result};

pub use crate::app::{Op, Request, Response};
