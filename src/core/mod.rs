mod dims;

pub use dims::Dims;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Precondition violated; {0}")]
    PreconditionViolation(String),
    #[error("Invariant violated; {0}")]
    InvariantViolation(String),
    #[error("Settings IO error; {0}")]
    SettingsIo(#[from] std::io::Error),
    #[error("Settings parse error; {0}")]
    SettingsParse(#[from] ron::error::SpannedError),
    #[error("Settings format error; {0}")]
    SettingsFormat(#[from] ron::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
