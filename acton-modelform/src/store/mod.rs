//! Access to persisted records
//!
//! [`Repository`] is the seam between the form renderer and an ORM. The
//! renderer only needs three things from it: model metadata by name, every
//! row of a model (the candidates of a select box), and the records linked
//! to a record through an association.
//!
//! [`MemoryStore`] is an in-memory implementation used by the test suite
//! and handy for prototyping forms without a database.

mod memory;

use std::sync::Arc;

use crate::error::Result;
use crate::model::{Associated, Association, ModelSchema, Record};

pub use memory::MemoryStore;

/// Source of model metadata and persisted records
pub trait Repository {
    /// Look up a model by name
    ///
    /// # Errors
    ///
    /// Returns [`ModelFormError::Repository`](crate::error::ModelFormError::Repository)
    /// if no such model is known.
    fn model(&self, name: &str) -> Result<Arc<ModelSchema>>;

    /// Every record of a model, ordered by `order` (primary key when `None`)
    ///
    /// # Errors
    ///
    /// Returns an error if the model's rows cannot be loaded.
    fn all(&self, model: &Arc<ModelSchema>, order: Option<&str>) -> Result<Vec<Record>>;

    /// Records linked to `record` through `association`
    ///
    /// # Errors
    ///
    /// Returns an error if the association cannot be fetched.
    fn associated(&self, record: &Record, association: &Association) -> Result<Associated>;
}
