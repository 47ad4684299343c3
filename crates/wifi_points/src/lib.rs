pub mod client;
pub mod database;

#[derive(Debug)]
pub enum RequestError {
    /// The addressed record does not exist.
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },
    /// A request parameter is outside its allowed range or shape. The
    /// constraint text is safe to show to callers.
    Validation {
        parameter: &'static str,
        constraint: String,
    },
    Database(database::DatabaseError),
}

impl RequestError {
    pub fn validation<S>(parameter: &'static str, constraint: S) -> Self
    where
        S: Into<String>,
    {
        Self::Validation {
            parameter,
            constraint: constraint.into(),
        }
    }
}

impl From<database::DatabaseError> for RequestError {
    fn from(value: database::DatabaseError) -> Self {
        RequestError::Database(value)
    }
}

pub type RequestResult<O> = Result<O, RequestError>;
