//! Error types and error handling
//!
//! Every failure while turning a record into markup is a
//! [`ModelFormError`]. The variants only differ in the context they carry;
//! callers should treat any of them as "this render request is invalid".

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = ModelFormError> = std::result::Result<T, E>;

/// Framework error type for form rendering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelFormError {
    /// The field is not a column, an association, or a method of the model
    #[error("unrecognized field `{field}` for {model} (at `{path}`)")]
    UnknownField {
        /// Model the field was looked up on
        model: String,
        /// Requested field
        field: String,
        /// Name path of the form level the lookup happened in
        path: String,
    },

    /// The association type cannot be rendered
    #[error("unsupported association type `{kind}` for {model}#{association}")]
    UnsupportedAssociation {
        /// Model owning the association
        model: String,
        /// Association name
        association: String,
        /// Declared association type
        kind: String,
    },

    /// None of the naming methods exist on an associated model
    #[error("no usable naming method for {model} (tried {tried})")]
    NoNameMethod {
        /// Associated model
        model: String,
        /// Methods probed, in order
        tried: String,
    },

    /// The repository failed to load models or associated records
    #[error("repository error: {0}")]
    Repository(String),
}

impl ModelFormError {
    /// Create a repository error from any displayable message
    #[must_use]
    pub fn repository(message: impl Into<String>) -> Self {
        Self::Repository(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_message() {
        let err = ModelFormError::UnknownField {
            model: "Album".into(),
            field: "foo".into(),
            path: "album[tracks_attributes][0]".into(),
        };
        let message = err.to_string();
        assert!(message.contains("`foo`"));
        assert!(message.contains("Album"));
        assert!(message.contains("album[tracks_attributes][0]"));
    }

    #[test]
    fn test_no_name_method_message() {
        let err = ModelFormError::NoNameMethod {
            model: "Artist".into(),
            tried: "forme_name, name, title, number".into(),
        };
        assert_eq!(
            err.to_string(),
            "no usable naming method for Artist (tried forme_name, name, title, number)"
        );
    }

    #[test]
    fn test_repository_helper() {
        let err = ModelFormError::repository("no table `albums`");
        assert_eq!(err, ModelFormError::Repository("no table `albums`".into()));
    }
}
