use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Required element not found: #{0}")]
    MissingElement(String),

    #[error("Page catalog is empty")]
    EmptyCatalog,

    #[error("Page index {index} out of range (total: {total})")]
    PageIndexOutOfRange { index: usize, total: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Host error: {0}")]
    Host(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
