//! In-memory repository

use std::collections::BTreeMap;
use std::sync::Arc;

use super::Repository;
use crate::error::{ModelFormError, Result};
use crate::model::{Associated, Association, AssociationKind, ModelSchema, Record, Value};

#[derive(Debug, Clone)]
struct Row {
    pk: Value,
    values: BTreeMap<String, Value>,
}

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: Vec<Row>,
}

/// Repository holding tables in memory
///
/// Rows get auto-incrementing integer primary keys starting at 1.
///
/// # Examples
///
/// ```rust
/// use acton_modelform::model::{Column, ColumnType, ModelSchema};
/// use acton_modelform::store::{MemoryStore, Repository};
///
/// let mut store = MemoryStore::new();
/// let artist = store.register(
///     ModelSchema::new("Artist", "artists").column(Column::new("name", ColumnType::String)),
/// );
/// store.insert("artists", [("name", "a")]);
/// store.insert("artists", [("name", "d")]);
///
/// let artists = store.all(&artist, Some("name")).unwrap();
/// assert_eq!(artists.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    models: BTreeMap<String, Arc<ModelSchema>>,
    tables: BTreeMap<String, Table>,
    joins: BTreeMap<String, Vec<(Value, Value)>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model, creating its table if needed
    ///
    /// Registering a model under an existing name replaces the previous
    /// schema; rows are kept.
    pub fn register(&mut self, model: ModelSchema) -> Arc<ModelSchema> {
        let model = Arc::new(model);
        self.tables.entry(model.table().to_owned()).or_default();
        self.models.insert(model.name().to_owned(), Arc::clone(&model));
        model
    }

    /// Insert a row and return its primary key
    pub fn insert<I, K, V>(&mut self, table: &str, values: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let table = self.tables.entry(table.to_owned()).or_default();
        table.next_id += 1;
        let pk = Value::Integer(table.next_id);
        table.rows.push(Row {
            pk: pk.clone(),
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        });
        pk
    }

    /// Link two rows through a join table
    pub fn link(&mut self, join_table: &str, left: impl Into<Value>, right: impl Into<Value>) {
        self.joins
            .entry(join_table.to_owned())
            .or_default()
            .push((left.into(), right.into()));
    }

    /// Load one record by primary key
    ///
    /// # Errors
    ///
    /// Returns [`ModelFormError::Repository`] if the model or row is missing.
    pub fn find(&self, model: &str, pk: impl Into<Value>) -> Result<Record> {
        let model = self.model(model)?;
        let pk = pk.into();
        self.rows(&model)?
            .into_iter()
            .find(|record| record.pk() == Some(&pk))
            .ok_or_else(|| {
                ModelFormError::repository(format!("no {} with primary key {pk}", model.name()))
            })
    }

    fn rows(&self, model: &Arc<ModelSchema>) -> Result<Vec<Record>> {
        let table = self.tables.get(model.table()).ok_or_else(|| {
            ModelFormError::repository(format!("no table `{}`", model.table()))
        })?;
        Ok(table
            .rows
            .iter()
            .map(|row| {
                row.values.iter().fold(
                    Record::load(Arc::clone(model), row.pk.clone()),
                    |record, (column, value)| record.with(column.clone(), value.clone()),
                )
            })
            .collect())
    }

    fn where_key(
        &self,
        association: &Association,
        owner_pk: Option<&Value>,
    ) -> Result<Vec<Record>> {
        let Some(owner_pk) = owner_pk else {
            return Ok(Vec::new());
        };
        let target = self.model(&association.target)?;
        Ok(self
            .all(&target, association.order.as_deref())?
            .into_iter()
            .filter(|record| record.value(&association.key) == Some(owner_pk))
            .collect())
    }
}

fn sort_records(records: &mut [Record], order: Option<&str>) {
    records.sort_by(|a, b| {
        let by_column = order.map_or(std::cmp::Ordering::Equal, |column| {
            let a = a.value(column).unwrap_or(&Value::Null);
            let b = b.value(column).unwrap_or(&Value::Null);
            a.cmp_for_order(b)
        });
        by_column.then_with(|| {
            a.pk()
                .unwrap_or(&Value::Null)
                .cmp_for_order(b.pk().unwrap_or(&Value::Null))
        })
    });
}

impl Repository for MemoryStore {
    fn model(&self, name: &str) -> Result<Arc<ModelSchema>> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| ModelFormError::repository(format!("unknown model `{name}`")))
    }

    fn all(&self, model: &Arc<ModelSchema>, order: Option<&str>) -> Result<Vec<Record>> {
        let mut records = self.rows(model)?;
        sort_records(&mut records, order);
        Ok(records)
    }

    fn associated(&self, record: &Record, association: &Association) -> Result<Associated> {
        match &association.kind {
            AssociationKind::ManyToOne => {
                let key = record
                    .value(&association.key)
                    .filter(|value| !value.is_null());
                let Some(key) = key else {
                    return Ok(Associated::One(None));
                };
                let target = self.model(&association.target)?;
                let found = self
                    .rows(&target)?
                    .into_iter()
                    .find(|candidate| candidate.pk() == Some(key));
                Ok(Associated::One(found))
            }
            AssociationKind::OneToOne => Ok(Associated::One(
                self.where_key(association, record.pk())?.into_iter().next(),
            )),
            AssociationKind::OneToMany => {
                Ok(Associated::Many(self.where_key(association, record.pk())?))
            }
            AssociationKind::ManyToMany => {
                let join = association.join.as_ref().ok_or_else(|| {
                    ModelFormError::repository(format!(
                        "many_to_many association `{}` has no join table",
                        association.name
                    ))
                })?;
                let Some(owner_pk) = record.pk() else {
                    return Ok(Associated::Many(Vec::new()));
                };
                let linked: Vec<&Value> = self
                    .joins
                    .get(&join.table)
                    .map(|pairs| {
                        pairs
                            .iter()
                            .filter(|(left, _)| left == owner_pk)
                            .map(|(_, right)| right)
                            .collect()
                    })
                    .unwrap_or_default();
                let target = self.model(&association.target)?;
                let targets = self
                    .all(&target, association.order.as_deref())?
                    .into_iter()
                    .filter(|candidate| candidate.pk().is_some_and(|pk| linked.contains(&pk)))
                    .collect();
                Ok(Associated::Many(targets))
            }
            AssociationKind::Other(kind) => Err(ModelFormError::UnsupportedAssociation {
                model: record.model().name().to_owned(),
                association: association.name.clone(),
                kind: kind.clone(),
            }),
        }
    }
}
