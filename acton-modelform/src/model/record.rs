//! Record instances

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{ModelSchema, Value};
use crate::error::{ModelFormError, Result};
use crate::forms::ValidationErrors;
use crate::store::Repository;

/// Records linked through an association
#[derive(Debug, Clone)]
pub enum Associated {
    /// Result of a to-one association
    One(Option<Record>),
    /// Result of a to-many association, in association order
    Many(Vec<Record>),
}

impl Associated {
    /// Flatten into a sequence of records
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::One(record) => record.into_iter().collect(),
            Self::Many(records) => records,
        }
    }

    /// Borrow the linked records
    #[must_use]
    pub fn records(&self) -> Vec<&Record> {
        match self {
            Self::One(record) => record.iter().collect(),
            Self::Many(records) => records.iter().collect(),
        }
    }
}

/// A model instance: identity, column values, errors, and cached associations
#[derive(Debug, Clone)]
pub struct Record {
    model: Arc<ModelSchema>,
    pk: Option<Value>,
    values: BTreeMap<String, Value>,
    errors: ValidationErrors,
    associations: BTreeMap<String, Associated>,
}

impl Record {
    /// Create a new, not yet persisted record
    #[must_use]
    pub fn new(model: Arc<ModelSchema>) -> Self {
        Self {
            model,
            pk: None,
            values: BTreeMap::new(),
            errors: ValidationErrors::new(),
            associations: BTreeMap::new(),
        }
    }

    /// Create a persisted record with the given primary key
    #[must_use]
    pub fn load(model: Arc<ModelSchema>, pk: impl Into<Value>) -> Self {
        let mut record = Self::new(model);
        record.pk = Some(pk.into());
        record
    }

    /// Set a column value (builder form)
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Set a column value
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(column.into(), value.into());
    }

    /// Model of this record
    #[must_use]
    pub const fn model(&self) -> &Arc<ModelSchema> {
        &self.model
    }

    /// Primary key, `None` for new records
    #[must_use]
    pub const fn pk(&self) -> Option<&Value> {
        self.pk.as_ref()
    }

    /// Whether the record has not been persisted yet
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.pk.is_none()
    }

    /// Whether the record has a persistent identity
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.pk.is_some()
    }

    /// Current value of a column; the primary key column reads the identity
    #[must_use]
    pub fn value(&self, column: &str) -> Option<&Value> {
        if column == self.model.primary_key() {
            return self.pk.as_ref();
        }
        self.values.get(column)
    }

    /// Validation errors attached to this record
    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Mutable access to validation errors
    pub fn errors_mut(&mut self) -> &mut ValidationErrors {
        &mut self.errors
    }

    /// Pre-load an association, overriding what the repository would return
    pub fn set_association(&mut self, name: impl Into<String>, associated: Associated) {
        self.associations.insert(name.into(), associated);
    }

    /// Pre-load an association (builder form)
    #[must_use]
    pub fn with_association(mut self, name: impl Into<String>, associated: Associated) -> Self {
        self.set_association(name, associated);
        self
    }

    /// Association value already held in memory, if any
    #[must_use]
    pub fn cached_association(&self, name: &str) -> Option<&Associated> {
        self.associations.get(name)
    }

    /// Linked records: the cached value, or one repository fetch
    ///
    /// # Errors
    ///
    /// Returns [`ModelFormError::UnknownField`] if the model has no such
    /// association, or the repository's error if the fetch fails.
    pub fn associated(&self, name: &str, repo: &dyn Repository) -> Result<Associated> {
        if let Some(cached) = self.associations.get(name) {
            return Ok(cached.clone());
        }
        let association =
            self.model
                .association_named(name)
                .ok_or_else(|| ModelFormError::UnknownField {
                    model: self.model.name().to_owned(),
                    field: name.to_owned(),
                    path: self.model.param_key(),
                })?;
        repo.associated(self, association)
    }
}
