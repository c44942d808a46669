//! acton-modelform: model-aware HTML form rendering
//!
//! Renders `<input>`, `<select>`, `<textarea>`, and nested fieldset
//! markup by inspecting a record's model: column types and nullability,
//! associations, validation errors, and current values.
//!
//! The ORM is reached through the [`store::Repository`] trait;
//! [`store::MemoryStore`] is an in-memory implementation.
//!
//! # Quick Start
//!
//! ```rust
//! use acton_modelform::prelude::*;
//!
//! # fn main() -> acton_modelform::error::Result<()> {
//! let mut store = MemoryStore::new();
//! store.register(ModelSchema::new("Artist", "artists").column(Column::new("name", ColumnType::String)));
//! let album = store.register(
//!     ModelSchema::new("Album", "albums")
//!         .column(Column::new("name", ColumnType::String))
//!         .column(Column::new("artist_id", ColumnType::Integer))
//!         .association(Association::many_to_one("artist", "Artist", "artist_id").order("name")),
//! );
//! let artist = store.insert("artists", [("name", "a")]);
//! let pk = store.insert("albums", [("name", Value::from("b")), ("artist_id", artist)]);
//! let record = store.find("Album", pk)?;
//!
//! let html = Form::render(record, &store, &FormAttrs::new(), |f| {
//!     f.add_input("name", &InputOptions::new())?;
//!     f.add_input("artist", &InputOptions::new())
//! })?;
//! assert!(html.starts_with(r#"<form class="forme album" method="post">"#));
//! assert!(html.contains(r#"<option selected="selected" value="1">a</option>"#));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod forms;
pub mod model;
pub mod observability;
pub mod store;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use acton_modelform::prelude::*;
    //! ```

    // Configuration
    pub use crate::config::ModelFormConfig;

    // Error types
    pub use crate::error::ModelFormError;

    // Form rendering
    pub use crate::forms::{
        Form, FormAttrs, FormOptions, InputAs, InputOptions, Legend, Node, SubformOptions,
        ValidationErrors, Wrapper,
    };

    // Model introspection
    pub use crate::model::{
        Associated, Association, AssociationKind, Column, ColumnType, ModelSchema, Record, Value,
    };

    // Persistence
    pub use crate::store::{MemoryStore, Repository};

    // Re-export key dependencies
    pub use validator;
}
