/// Failure of a single command, carrying the reply shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Wrong argument count or malformed argument
    #[error("{0}")]
    Validation(String),

    /// Registration, credential or session problem
    #[error("{0}")]
    Auth(String),

    /// Unknown vaccine, date or appointment
    #[error("{0}")]
    NotFound(String),

    /// Operation not possible in the current stock or slot state
    #[error("{0}")]
    State(String),

    /// Database failure, reported with a generic reply
    #[error("{reply}")]
    Storage {
        /// Reply shown to the user
        reply: String,
        /// The underlying failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CommandError {
    /// Wraps a storage failure, logging it before it is replaced by `reply`.
    pub fn storage<E>(reply: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        log::error!("❌ {} ({})", reply, source);
        CommandError::Storage {
            reply: reply.to_string(),
            source: Box::new(source),
        }
    }

    /// The text printed for this failure
    pub fn reply(&self) -> String {
        self.to_string()
    }
}
