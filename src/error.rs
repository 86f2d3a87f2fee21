//! Error handling for domain-toolkit

use thiserror::Error;

/// Main error type for domain-toolkit
#[derive(Error, Debug, Clone)]
pub enum ToolkitError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("API error ({status_code}): {message}")]
    Api { message: String, status_code: u16 },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Storage error for key '{key}': {source}")]
    Storage {
        key: String,
        #[source]
        source: Box<ToolkitError>,
    },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ToolkitError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create an API error from a non-success backend response
    pub fn api(message: impl Into<String>, status_code: u16) -> Self {
        Self::Api {
            message: message.into(),
            status_code,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Wrap a store failure with the key that was being accessed
    pub fn storage(key: impl Into<String>, source: ToolkitError) -> Self {
        Self::Storage {
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the backend rejected the request because the session is missing or expired
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Api { status_code: 401, .. } | Self::Network { status_code: Some(401), .. }
        )
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { message } => {
                format!("❌ {}\n💡 Enter a domain name such as example.com", message)
            }
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your .env file or environment", message)
            }
            Self::Network { message, status_code, .. } => {
                let status = status_code.map_or(String::new(), |c| format!(" ({})", c));
                format!("❌ Network error{}: {}\n💡 Check your internet connection", status, message)
            }
            Self::Api { message, status_code } => match status_code {
                401 | 403 => format!(
                    "❌ Not signed in: {}\n💡 Set DOMAIN_TOOLKIT_API_TOKEN to a valid session token",
                    message
                ),
                _ => format!("❌ Service error ({}): {}\n💡 Try again in a moment", status_code, message),
            },
            Self::Parse { message, .. } => {
                format!("❌ Unexpected response: {}\n💡 This might be a temporary issue, try again", message)
            }
            Self::Storage { key, source } => {
                format!("⚠️  Could not access saved setting '{}'\n{}", key, source.user_message())
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

impl From<reqwest::Error> for ToolkitError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_timeout() {
            Self::network("Request timed out", status_code, url)
        } else if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else if err.is_decode() {
            Self::parse(err.to_string(), None)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

impl From<serde_json::Error> for ToolkitError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for ToolkitError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

impl From<url::ParseError> for ToolkitError {
    fn from(err: url::ParseError) -> Self {
        Self::config(format!("Invalid URL: {}", err))
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ToolkitError>;

/// Helper macro for invalid input errors
#[macro_export]
macro_rules! invalid_input {
    ($msg:expr) => {
        $crate::error::ToolkitError::invalid_input($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::ToolkitError::invalid_input(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ToolkitError::invalid_input("Domain name cannot be empty");
        assert_eq!(error.to_string(), "Invalid input: Domain name cannot be empty");

        let error = ToolkitError::api("forbidden", 403);
        assert!(error.to_string().contains("403"));
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(ToolkitError::api("expired", 401).is_unauthorized());
        assert!(!ToolkitError::api("missing", 404).is_unauthorized());
        assert!(!ToolkitError::internal("boom").is_unauthorized());
    }

    #[test]
    fn test_user_message_hints() {
        let msg = ToolkitError::api("expired", 401).user_message();
        assert!(msg.contains("DOMAIN_TOOLKIT_API_TOKEN"));

        let msg = crate::invalid_input!("bad domain '{}'", "x..com").user_message();
        assert!(msg.contains("x..com"));
    }
}
