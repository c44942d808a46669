//! Labels for fields and associated records

use inflector::Inflector;

use crate::error::{ModelFormError, Result};
use crate::model::{ModelSchema, Record};
use crate::store::Repository;

/// Methods probed to label an associated record, most specific first
pub const NAME_CANDIDATES: [&str; 4] = ["forme_name", "name", "title", "number"];

/// Label text for a field (`copies_sold` -> `Copies sold`)
#[must_use]
pub fn humanize(field: &str) -> String {
    field.to_sentence_case()
}

/// Singular form of a name (`tracks` -> `track`)
#[must_use]
pub fn singular(name: &str) -> String {
    name.to_singular()
}

/// Pick the method that labels records of `target`
///
/// An explicit `preferred` method must exist on the target; otherwise the
/// first of [`NAME_CANDIDATES`] the target responds to wins.
///
/// # Errors
///
/// Returns [`ModelFormError::NoNameMethod`] when no probed method exists.
pub fn name_method(target: &ModelSchema, preferred: Option<&str>) -> Result<String> {
    if let Some(method) = preferred {
        if target.responds_to(method) {
            return Ok(method.to_owned());
        }
        return Err(ModelFormError::NoNameMethod {
            model: target.name().to_owned(),
            tried: method.to_owned(),
        });
    }
    NAME_CANDIDATES
        .iter()
        .find(|candidate| target.responds_to(candidate))
        .map(|candidate| (*candidate).to_owned())
        .ok_or_else(|| ModelFormError::NoNameMethod {
            model: target.name().to_owned(),
            tried: NAME_CANDIDATES.join(", "),
        })
}

/// Text shown for `record` using a resolved naming method
///
/// # Errors
///
/// Propagates failures of the method itself.
pub fn display_name(record: &Record, method: &str, repo: &dyn Repository) -> Result<String> {
    Ok(record
        .model()
        .call(method, record, repo)?
        .map(|value| value.to_string())
        .unwrap_or_default())
}
