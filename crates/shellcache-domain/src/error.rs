//! Error handling types

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by the contextual variants
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the shell cache
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// A construction function failed; the cache key stays unmapped
    #[error("Failed to build {resource}: {message}")]
    Build {
        /// Resource being built
        resource: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// A construction function did not finish in time
    #[error("Building {resource} timed out after {timeout:?}")]
    BuildTimeout {
        /// Resource being built
        resource: String,
        /// Configured limit
        timeout: Duration,
    },

    /// A settings source could not be read or parsed
    #[error("Failed to load settings from {}: {message}", path.display())]
    SettingsLoad {
        /// Settings file
        path: PathBuf,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// A read raced with a concurrent write, replace or delete of the source
    #[error("Settings source {} changed while reading: {message}", path.display())]
    TransientRace {
        /// Settings file
        path: PathBuf,
        /// Description of the race
        message: String,
    },

    /// The owning holder has been disposed
    #[error("{resource} has been disposed")]
    Disposed {
        /// Disposed resource
        resource: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Cache lifecycle error creation methods
impl Error {
    /// Create a build failure
    pub fn build<R: Into<String>, S: Into<String>>(resource: R, message: S) -> Self {
        Self::Build {
            resource: resource.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a build failure wrapping the collaborator error
    pub fn build_with_source<R: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        resource: R,
        source: E,
    ) -> Self {
        Self::Build {
            resource: resource.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a build timeout error
    pub fn build_timeout<R: Into<String>>(resource: R, timeout: Duration) -> Self {
        Self::BuildTimeout {
            resource: resource.into(),
            timeout,
        }
    }

    /// Create a disposed error
    pub fn disposed<R: Into<String>>(resource: R) -> Self {
        Self::Disposed {
            resource: resource.into(),
        }
    }
}

// Settings error creation methods
impl Error {
    /// Create a settings load error
    pub fn settings_load<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::SettingsLoad {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a settings load error with source
    pub fn settings_load_with_source<
        P: Into<PathBuf>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        path: P,
        source: E,
    ) -> Self {
        Self::SettingsLoad {
            path: path.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a transient race error
    pub fn transient_race<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::TransientRace {
            path: path.into(),
            message: message.into(),
        }
    }
}

// Infrastructure error creation methods
impl Error {
    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification
impl Error {
    /// Expected noise from a reload racing a concurrent file replace
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientRace { .. })
    }

    /// Failure raised by, or on behalf of, a construction function
    pub fn is_build_failure(&self) -> bool {
        matches!(self, Self::Build { .. } | Self::BuildTimeout { .. })
    }

    /// Use of a holder after disposal
    pub fn is_disposed(&self) -> bool {
        matches!(self, Self::Disposed { .. })
    }
}
