use thiserror::Error;

#[derive(Debug, Error)]
pub enum OoslaError {
    #[error("team configuration not found: {0}")]
    ConfigNotFound(String),

    #[error("invalid team configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown priority '{0}': must be one of p0, p1, p2, p3")]
    InvalidPriority(String),

    #[error("unknown weekday '{0}': use full names like 'tuesday'")]
    InvalidWeekday(String),

    #[error("unparseable creation timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("tracker error: {0}")]
    Tracker(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OoslaError>;
