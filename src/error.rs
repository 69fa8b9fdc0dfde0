use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("data file not found: {0}")]
    MissingFile(String),

    #[error("malformed data file {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("{file} references undefined tag: {tag}")]
    UndefinedTag { file: String, tag: String },

    #[error("{file} pairs non-genre tag: {tag}")]
    NotGenre { file: String, tag: String },

    #[error("tag {0} does not resolve to a known category")]
    UnknownCategory(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum CompatError {
    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("unknown tag: {0}")]
    UnknownTag(String),

    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CompatError>;
