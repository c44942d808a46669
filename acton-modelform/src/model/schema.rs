//! Model metadata: columns, associations, and methods
//!
//! A [`ModelSchema`] is the form layer's view of an ORM model class. It
//! answers the questions the renderer asks while classifying a field:
//! is this a column (and of what type), an association (of what kind),
//! or a method that can be called on a record?

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use inflector::Inflector;

use super::{Record, Value};
use crate::error::{ModelFormError, Result};
use crate::store::Repository;

/// Declared column types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Short text (VARCHAR)
    String,
    /// Long text
    Text,
    /// Integer
    Integer,
    /// Floating point
    Float,
    /// Exact decimal
    Decimal,
    /// Boolean
    Boolean,
    /// Date without time
    Date,
    /// Date with time
    DateTime,
    /// Binary data, rendered as a file upload
    Blob,
}

impl ColumnType {
    /// Class token used on wrapper tags
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Blob => "blob",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A table column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Declared type
    pub column_type: ColumnType,
    /// Whether NULL is accepted
    pub allow_null: bool,
    /// Database default, shown for new records without a value
    pub default: Option<Value>,
}

impl Column {
    /// Create a nullable column without a default
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            allow_null: true,
            default: None,
        }
    }

    /// Mark the column `NOT NULL`
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.allow_null = false;
        self
    }

    /// Set the database default
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Nullable boolean: true, false, or unknown
    #[must_use]
    pub const fn is_tri_state(&self) -> bool {
        matches!(self.column_type, ColumnType::Boolean) && self.allow_null
    }

    /// Boolean that can only be true or false
    #[must_use]
    pub const fn is_dual_state(&self) -> bool {
        matches!(self.column_type, ColumnType::Boolean) && !self.allow_null
    }
}

/// Association types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssociationKind {
    /// Foreign key on this model pointing at one target
    ManyToOne,
    /// Foreign key on the target pointing back, at most one target
    OneToOne,
    /// Foreign key on the target pointing back, ordered targets
    OneToMany,
    /// Targets linked through a join table
    ManyToMany,
    /// Any other association type; not renderable
    Other(String),
}

impl AssociationKind {
    /// Type name, also used as the wrapper class token
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ManyToOne => "many_to_one",
            Self::OneToOne => "one_to_one",
            Self::OneToMany => "one_to_many",
            Self::ManyToMany => "many_to_many",
            Self::Other(kind) => kind,
        }
    }

    /// Whether the association links a sequence of records
    #[must_use]
    pub const fn is_to_many(&self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join table metadata for many-to-many associations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinTable {
    /// Join table name
    pub table: String,
    /// Column referencing the owning model
    pub left_key: String,
    /// Column referencing the target model
    pub right_key: String,
}

/// An association descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    /// Association name (`artist`, `tracks`)
    pub name: String,
    /// Association type
    pub kind: AssociationKind,
    /// Target model name
    pub target: String,
    /// Foreign key column
    ///
    /// Lives on the owner for `many_to_one`, on the target for
    /// `one_to_one` and `one_to_many`.
    pub key: String,
    /// Join table for `many_to_many`
    pub join: Option<JoinTable>,
    /// Column the targets are ordered by (primary key when unset)
    pub order: Option<String>,
    /// Whether a target must be chosen
    pub required: bool,
    /// Method used to label targets, overriding the naming probes
    pub name_method: Option<String>,
}

impl Association {
    /// Create an association of any kind
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: AssociationKind,
        target: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            target: target.into(),
            key: key.into(),
            join: None,
            order: None,
            required: false,
            name_method: None,
        }
    }

    /// `many_to_one` through a foreign key on the owner
    #[must_use]
    pub fn many_to_one(
        name: impl Into<String>,
        target: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self::new(name, AssociationKind::ManyToOne, target, key)
    }

    /// `one_to_one` through a foreign key on the target
    #[must_use]
    pub fn one_to_one(
        name: impl Into<String>,
        target: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self::new(name, AssociationKind::OneToOne, target, key)
    }

    /// `one_to_many` through a foreign key on the target
    #[must_use]
    pub fn one_to_many(
        name: impl Into<String>,
        target: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self::new(name, AssociationKind::OneToMany, target, key)
    }

    /// `many_to_many` through a join table
    #[must_use]
    pub fn many_to_many(
        name: impl Into<String>,
        target: impl Into<String>,
        join_table: impl Into<String>,
        left_key: impl Into<String>,
        right_key: impl Into<String>,
    ) -> Self {
        let left_key = left_key.into();
        let mut association = Self::new(name, AssociationKind::ManyToMany, target, left_key.clone());
        association.join = Some(JoinTable {
            table: join_table.into(),
            left_key,
            right_key: right_key.into(),
        });
        association
    }

    /// Order targets by a column
    #[must_use]
    pub fn order(mut self, column: impl Into<String>) -> Self {
        self.order = Some(column.into());
        self
    }

    /// Require a target to be chosen
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Label targets with a specific method
    #[must_use]
    pub fn name_method(mut self, method: impl Into<String>) -> Self {
        self.name_method = Some(method.into());
        self
    }

    /// Singular form of the association name (`tracks` -> `track`)
    #[must_use]
    pub fn singular_name(&self) -> String {
        self.name.to_singular()
    }
}

/// A callable model method, given the record and the repository it came from
pub type Method = Arc<dyn Fn(&Record, &dyn Repository) -> Result<Option<Value>> + Send + Sync>;

/// Metadata of a model class
#[derive(Clone)]
pub struct ModelSchema {
    name: String,
    table: String,
    primary_key: String,
    columns: Vec<Column>,
    associations: Vec<Association>,
    methods: BTreeMap<String, Method>,
    undefined: BTreeSet<String>,
}

impl fmt::Debug for ModelSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSchema")
            .field("name", &self.name)
            .field("table", &self.table)
            .field("primary_key", &self.primary_key)
            .field("columns", &self.columns)
            .field("associations", &self.associations)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("undefined", &self.undefined)
            .finish()
    }
}

impl ModelSchema {
    /// Create a model backed by a table, with an `id` primary key
    #[must_use]
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            primary_key: "id".into(),
            columns: Vec::new(),
            associations: Vec::new(),
            methods: BTreeMap::new(),
            undefined: BTreeSet::new(),
        }
    }

    /// Add a column, replacing any column with the same name
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        if let Some(existing) = self.columns.iter_mut().find(|c| c.name == column.name) {
            *existing = column;
        } else {
            self.columns.push(column);
        }
        self
    }

    /// Add an association, replacing any association with the same name
    #[must_use]
    pub fn association(mut self, association: Association) -> Self {
        if let Some(existing) = self
            .associations
            .iter_mut()
            .find(|a| a.name == association.name)
        {
            *existing = association;
        } else {
            self.associations.push(association);
        }
        self
    }

    /// Define a method callable on records of this model
    #[must_use]
    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Record, &dyn Repository) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        let name = name.into();
        self.undefined.remove(&name);
        self.methods.insert(name, Arc::new(f));
        self
    }

    /// Remove a method or column reader
    ///
    /// The column keeps storing data; only the reader stops answering.
    #[must_use]
    pub fn undefine(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.methods.remove(&name);
        self.undefined.insert(name);
        self
    }

    /// Model name (`Album`)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backing table name (`albums`)
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Primary key column name
    #[must_use]
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Root of field names and ids (`Album` -> `album`)
    #[must_use]
    pub fn param_key(&self) -> String {
        self.name.to_snake_case()
    }

    /// All columns in declaration order
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column
    #[must_use]
    pub fn column_named(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up an association
    #[must_use]
    pub fn association_named(&self, name: &str) -> Option<&Association> {
        self.associations.iter().find(|a| a.name == name)
    }

    /// Whether `name` can be called on records of this model
    #[must_use]
    pub fn responds_to(&self, name: &str) -> bool {
        if self.methods.contains_key(name) {
            return true;
        }
        !self.undefined.contains(name)
            && (name == self.primary_key || self.column_named(name).is_some())
    }

    /// Call a method or column reader on a record
    ///
    /// # Errors
    ///
    /// Returns [`ModelFormError::UnknownField`] when the model does not
    /// respond to `name`, or whatever the method itself returns.
    pub fn call(&self, name: &str, record: &Record, repo: &dyn Repository) -> Result<Option<Value>> {
        if let Some(method) = self.methods.get(name) {
            return method(record, repo);
        }
        if self.responds_to(name) {
            return Ok(record.value(name).cloned());
        }
        Err(ModelFormError::UnknownField {
            model: self.name.clone(),
            field: name.to_owned(),
            path: self.param_key(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn artist() -> ModelSchema {
        ModelSchema::new("Artist", "artists").column(Column::new("name", ColumnType::String))
    }

    #[test]
    fn test_param_key() {
        assert_eq!(artist().param_key(), "artist");
        assert_eq!(ModelSchema::new("AlbumInfo", "album_infos").param_key(), "album_info");
    }

    #[test]
    fn test_column_replaced_by_name() {
        let schema = artist().column(Column::new("name", ColumnType::String).not_null());
        assert_eq!(schema.columns().len(), 1);
        assert!(!schema.column_named("name").unwrap().allow_null);
    }

    #[test]
    fn test_boolean_states() {
        let gold = Column::new("gold", ColumnType::Boolean);
        let platinum = Column::new("platinum", ColumnType::Boolean)
            .not_null()
            .default_value(false);
        assert!(gold.is_tri_state());
        assert!(!gold.is_dual_state());
        assert!(platinum.is_dual_state());
        assert!(!Column::new("name", ColumnType::String).is_tri_state());
    }

    #[test]
    fn test_responds_to_columns_and_methods() {
        let schema = artist().method("number", |_, _| Ok(None));
        assert!(schema.responds_to("name"));
        assert!(schema.responds_to("id"));
        assert!(schema.responds_to("number"));
        assert!(!schema.responds_to("title"));
    }

    #[test]
    fn test_undefine_hides_column_reader() {
        let schema = artist().undefine("name");
        assert!(!schema.responds_to("name"));
        assert!(schema.column_named("name").is_some());

        let redefined = schema.method("name", |_, _| Ok(Some("x".into())));
        assert!(redefined.responds_to("name"));
    }

    #[test]
    fn test_call_reads_columns_and_methods() {
        let store = MemoryStore::new();
        let schema = Arc::new(artist().method("shout", |record, _| {
            Ok(record.value("name").map(|v| Value::from(v.to_string().to_uppercase())))
        }));
        let record = Record::load(schema.clone(), 1).with("name", "a");

        assert_eq!(schema.call("name", &record, &store).unwrap(), Some(Value::from("a")));
        assert_eq!(schema.call("shout", &record, &store).unwrap(), Some(Value::from("A")));
        assert!(schema.call("missing", &record, &store).is_err());
    }

    #[test]
    fn test_association_helpers() {
        let tags = Association::many_to_many("tags", "Tag", "albums_tags", "album_id", "tag_id");
        assert!(tags.kind.is_to_many());
        assert_eq!(tags.singular_name(), "tag");
        assert_eq!(tags.join.as_ref().unwrap().right_key, "tag_id");

        let artist = Association::many_to_one("artist", "Artist", "artist_id").order("name");
        assert_eq!(artist.kind.as_str(), "many_to_one");
        assert_eq!(artist.order.as_deref(), Some("name"));
        assert_eq!(AssociationKind::Other("foo".into()).as_str(), "foo");
    }
}
