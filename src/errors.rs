use thiserror::Error as ThisError;

use crate::{
    framework::{config, store::StoreError},
    games::ppt::{puzzle::ContentError, SelectError},
};

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] config::Error),

    #[error("puzzle content error: {0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Select(#[from] SelectError),

    #[error("session storage error: {0}")]
    Store(#[from] StoreError),
}
