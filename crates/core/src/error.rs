use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("malformed input: more than one sample dated {date}")]
    MalformedInput { date: NaiveDate },
    #[error("unknown evaluation mode: {0}")]
    UnknownMode(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
