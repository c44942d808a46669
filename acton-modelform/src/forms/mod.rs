//! Model-aware form rendering
//!
//! This module turns record fields into form markup by inspecting the
//! record's model:
//! - Columns pick a widget from their type, name, and nullability
//! - Associations render select boxes, radio sets, or checkbox sets over
//!   the target records
//! - Nested subforms render fields of associated records with
//!   nested-attributes names
//! - Validation errors are shown next to the failing control
//!
//! # Quick Start
//!
//! ```rust
//! use acton_modelform::forms::{Form, InputOptions, Wrapper, FormOptions};
//! use acton_modelform::model::{Column, ColumnType, ModelSchema, Record};
//! use acton_modelform::store::MemoryStore;
//!
//! let mut store = MemoryStore::new();
//! let album = store.register(
//!     ModelSchema::new("Album", "albums")
//!         .column(Column::new("name", ColumnType::String).not_null()),
//! );
//! let record = Record::load(album, 1).with("name", "b");
//!
//! let form = Form::with_options(record, &store, FormOptions::new().wrapper(Wrapper::tag("li")));
//! assert_eq!(
//!     form.input("name", &InputOptions::new()).unwrap().to_string(),
//!     r#"<li class="string required"><label>Name: <input id="album_name" name="album[name]" required="required" type="text" value="b"/></label></li>"#
//! );
//! ```
//!
//! # Validation Errors
//!
//! Errors attached to the record are rendered after the control:
//!
//! ```rust
//! use acton_modelform::forms::{Form, InputOptions};
//! use acton_modelform::model::{Column, ColumnType, ModelSchema, Record};
//! use acton_modelform::store::MemoryStore;
//!
//! let mut store = MemoryStore::new();
//! let album = store.register(
//!     ModelSchema::new("Album", "albums").column(Column::new("name", ColumnType::String)),
//! );
//! let mut record = Record::load(album, 1).with("name", "b");
//! record.errors_mut().add("name", "tis not valid");
//!
//! let html = Form::new(record, &store).input("name", &InputOptions::new()).unwrap().to_string();
//! assert!(html.ends_with(r#"<span class="error_message">tis not valid</span></label>"#));
//! ```

mod association;
mod error;
mod field;
mod form;
mod introspect;
mod naming;
mod options;
mod render;
mod subform;
pub mod tag;

pub use association::{association_field, candidates};
pub use error::{FieldError, ValidationErrors};
pub use field::{InputType, SelectOption, Widget};
pub use form::Form;
pub use introspect::{classify, column_widget, input_type_for_name, is_required, FieldKind};
pub use naming::{display_name, humanize, name_method, singular, NAME_CANDIDATES};
pub use options::{
    FormAttrs, FormOptions, InputAs, InputOptions, Legend, SubformObject, SubformOptions,
    WrapContext, Wrapper,
};
pub use render::{FieldContext, FieldRenderer};
pub use tag::{Attrs, Node, Tag};
