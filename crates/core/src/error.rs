//! Error types for Breakpoint.

use alloc::string::String;
use core::fmt;

/// Result type alias for Breakpoint operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Configuration errors.
///
/// Everything here is raised while reading construction inputs or while
/// normalizing descriptors, before any subscription is left open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No query mapping was supplied.
    MissingQueries,
    /// The query mapping has no entries.
    EmptyQueries,
    /// Two entries share the same logical name.
    DuplicateQuery {
        name: String,
    },
    /// A descriptor could not be turned into a media query string.
    InvalidDescriptor {
        /// Logical name of the entry, empty when not yet known.
        name: String,
        message: String,
    },
    /// A construction option has the wrong shape.
    InvalidOption {
        option: String,
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingQueries => write!(f, "Missing required option: queries"),
            Error::EmptyQueries => write!(f, "Option queries must contain at least one entry"),
            Error::DuplicateQuery { name } => write!(f, "Duplicate query name: {}", name),
            Error::InvalidDescriptor { name, message } if name.is_empty() => {
                write!(f, "Invalid query descriptor: {}", message)
            }
            Error::InvalidDescriptor { name, message } => {
                write!(f, "Invalid query descriptor for {}: {}", name, message)
            }
            Error::InvalidOption { option, message } => {
                write!(f, "Invalid option {}: {}", option, message)
            }
        }
    }
}

impl Error {
    /// Creates a duplicate query error.
    pub fn duplicate_query(name: impl Into<String>) -> Self {
        Error::DuplicateQuery { name: name.into() }
    }

    /// Creates an invalid descriptor error with no entry name attached.
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Error::InvalidDescriptor {
            name: String::new(),
            message: message.into(),
        }
    }

    /// Creates an invalid option error.
    pub fn invalid_option(option: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidOption {
            option: option.into(),
            message: message.into(),
        }
    }

    /// Attaches the logical query name to a descriptor error.
    ///
    /// Other variants are returned unchanged.
    pub fn in_query(self, query: &str) -> Self {
        match self {
            Error::InvalidDescriptor { message, .. } => Error::InvalidDescriptor {
                name: query.into(),
                message,
            },
            other => other,
        }
    }
}
