//! Input validation limits for resource protection

/// Maximum length for person names (256 chars)
pub const MAX_PERSON_NAME_LEN: usize = 256;

/// Maximum nodes visited by a single shortest-path query (10000)
pub const MAX_TRAVERSAL_NODES: usize = 10_000;

/// Validation error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyPersonName,
    PersonNameTooLong { len: usize, max: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPersonName => write!(f, "Person name cannot be empty"),
            Self::PersonNameTooLong { len, max } => {
                write!(f, "Person name too long: {} chars (max {})", len, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate person name
pub fn validate_person_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyPersonName);
    }
    if name.len() > MAX_PERSON_NAME_LEN {
        return Err(ValidationError::PersonNameTooLong {
            len: name.len(),
            max: MAX_PERSON_NAME_LEN,
        });
    }
    Ok(())
}
