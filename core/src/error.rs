use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Roster file unreadable: {0}")]
    RosterUnreadable(#[from] csv::Error),

    #[error("Roster is missing a recognizable {0} column")]
    RosterColumnsMissing(&'static str),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("User '{name}' already exists")]
    UserExists { name: String },

    #[error("Username and password must not be blank")]
    BlankCredentials,

    #[error("Invalid month '{0}' (expected JAN..DEC)")]
    InvalidMonth(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DeskResult<T> = Result<T, DeskError>;
