use glentrail_model::ParseError;

#[derive(Debug)]
pub enum StoreError {
    /// The request carried no resolvable identity.
    NotAuthenticated,
    /// The identity is known but may not perform this action.
    NotAuthorized(&'static str),
    NotFound { entity: &'static str, key: String },
    Validation(String),
    Conflict(String),
    Sql(rusqlite::Error),
    Io(std::io::Error),
    Internal(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "not authenticated"),
            Self::NotAuthorized(message) => write!(f, "not authorized: {message}"),
            Self::NotFound { entity, key } => write!(f, "{entity} '{key}' not found"),
            Self::Validation(message) => write!(f, "invalid input: {message}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Internal(message) => write!(f, "internal: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ParseError> for StoreError {
    fn from(value: ParseError) -> Self {
        Self::Validation(value.to_string())
    }
}
