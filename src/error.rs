use std::fmt;

/// Errors that can occur while building guard components.
///
/// Decision and validation paths never fail; only construction-time
/// operations (loading configuration, compiling deny-lists) return this type.
#[derive(Debug)]
pub enum Error {
    /// Configuration was rejected
    Config(ConfigError),
    /// A deny-list pattern failed to compile
    Pattern(PatternError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Invalid configuration: {}", e),
            Error::Pattern(e) => write!(f, "Invalid pattern: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(e) => Some(e),
            Error::Pattern(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<PatternError> for Error {
    fn from(e: PatternError) -> Self {
        Error::Pattern(e)
    }
}

/// A configuration problem with details about which setting failed.
#[derive(Debug)]
pub struct ConfigError {
    /// The setting that was rejected
    pub field: &'static str,
    /// Human-readable explanation
    pub message: String,
}

impl ConfigError {
    /// Creates a new configuration error.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// A pattern that could not be compiled into a regular expression.
#[derive(Debug)]
pub struct PatternError {
    /// Name the pattern was registered under
    pub name: String,
    source: regex::Error,
}

impl PatternError {
    pub(crate) fn new(name: impl Into<String>, source: regex::Error) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern '{}' does not compile", self.name)
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display_names_field() {
        let err = Error::from(ConfigError::new("tenant_header_value", "must not be empty"));

        let output = err.to_string();
        assert!(output.contains("Invalid configuration"));
        assert!(output.contains("tenant_header_value"));
        assert!(output.contains("must not be empty"));
    }

    #[test]
    fn pattern_error_keeps_regex_source() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err = Error::from(PatternError::new("broken", regex_err));

        assert!(err.to_string().contains("broken"));
        let source = std::error::Error::source(&err).expect("has source");
        assert!(std::error::Error::source(source).is_some());
    }
}
