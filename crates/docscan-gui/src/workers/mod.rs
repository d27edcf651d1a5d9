mod config;
mod dispatch;
mod documents;
mod io;
mod upload;

pub use dispatch::spawn_worker;
pub(crate) use dispatch::{send, send_error, send_log};
