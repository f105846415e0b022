use thiserror::Error;

/// A failed gateway call: transport failure, non-2xx response, or an
/// undecodable body. Every variant carries enough to render a user message.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request to {url} failed: {message}")]
    Transport {
        url: String,
        message: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server returned {status} for {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },
    #[error("failed to decode response from {url}: {message}")]
    Decode {
        url: String,
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RemoteError {
    /// HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            Self::Decode { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The server-provided message for status errors, used verbatim in the
    /// UI when present.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { status, message, .. } if (400..500).contains(status) => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("not logged in: {0}")]
    Auth(String),
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}
