//! Model introspection layer
//!
//! The form renderer never talks to a database directly. It inspects
//! [`ModelSchema`] metadata and [`Record`] state, and asks a
//! [`Repository`](crate::store::Repository) for candidate and associated
//! records.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use acton_modelform::model::{Association, Column, ColumnType, ModelSchema, Record};
//!
//! let album = Arc::new(
//!     ModelSchema::new("Album", "albums")
//!         .column(Column::new("name", ColumnType::String))
//!         .column(Column::new("artist_id", ColumnType::Integer))
//!         .association(Association::many_to_one("artist", "Artist", "artist_id").order("name")),
//! );
//!
//! let record = Record::load(album, 1).with("name", "b").with("artist_id", 1);
//! assert!(record.is_persisted());
//! ```

mod record;
mod schema;
mod value;

pub use record::{Associated, Record};
pub use schema::{
    Association, AssociationKind, Column, ColumnType, JoinTable, Method, ModelSchema,
};
pub use value::Value;
