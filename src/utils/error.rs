use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Construct '{id}' of type {kind} is already declared in stack {stack}")]
    DuplicateConstruct {
        stack: String,
        kind: String,
        id: String,
    },

    #[error("Invalid patch '{from}' -> '{to}': {reason}")]
    InvalidPatch {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Failed to patch {path}")]
    PatchError {
        path: String,
        #[source]
        source: Box<StackError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Declaration,
    FileSystem,
}

impl StackError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StackError::TomlError(_)
            | StackError::ConfigError { .. }
            | StackError::InvalidConfigValueError { .. }
            | StackError::InvalidPatch { .. } => ErrorCategory::Configuration,
            StackError::DuplicateConstruct { .. } | StackError::SerializationError(_) => {
                ErrorCategory::Declaration
            }
            StackError::IoError(_) | StackError::PatchError { .. } => ErrorCategory::FileSystem,
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Declaration => 2,
            ErrorCategory::FileSystem => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StackError::TomlError(e) => {
                format!("The configuration file could not be parsed: {}", e)
            }
            StackError::InvalidConfigValueError { field, reason, .. } => {
                format!("'{}' is invalid: {}", field, reason)
            }
            StackError::PatchError { path, .. } => {
                format!("The synthesized document {} could not be patched", path)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the configuration file against the documented keys (aws_region, environment, [network], [service], [synth])"
            }
            ErrorCategory::Declaration => {
                "Every construct in a stack needs a unique id per resource type"
            }
            ErrorCategory::FileSystem => {
                "Make sure the output directory exists and is writable, then synthesize again"
            }
        }
    }

    pub(crate) fn patch(path: impl Into<String>, source: StackError) -> Self {
        StackError::PatchError {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, StackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_follow_category() {
        let err = StackError::InvalidPatch {
            from: "self".to_string(),
            to: "self_attribute".to_string(),
            reason: "replacement contains the pattern".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);

        let err = StackError::patch(
            "cdktf.out/cdk.tf.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into(),
        );
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("cdktf.out/cdk.tf.json"));
    }

    #[test]
    fn test_user_friendly_message_names_field() {
        let err = StackError::InvalidConfigValueError {
            field: "network.cidr".to_string(),
            value: "10.0.0.0".to_string(),
            reason: "expected a.b.c.d/n".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "'network.cidr' is invalid: expected a.b.c.d/n"
        );
    }
}
