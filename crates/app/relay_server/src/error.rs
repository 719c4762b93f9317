use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Config(#[from] relay_api::config::ConfigError),

    #[error("IO::{:?}: {}", .0.kind(), .0)]
    Io(#[from] std::io::Error),
}
