//! Nested subforms
//!
//! `subform` renders fields of associated records inside the parent form,
//! named so a nested-attributes handler can map them back:
//! `album[artist_attributes][name]` for to-one associations and
//! `album[tracks_attributes][0][name]` for to-many ones. Levels nest to
//! any depth.

use std::sync::Arc;

use tracing::debug;

use super::form::{Form, Scope};
use super::naming::{humanize, singular};
use super::options::{InputOptions, SubformObject, SubformOptions};
use super::tag::{Node, Tag};
use crate::error::{ModelFormError, Result};
use crate::model::{Association, AssociationKind, Record};

impl Form<'_> {
    /// Render a nested level for each target of `association`
    ///
    /// Targets are `options.obj` when given, otherwise the record's cached
    /// association, otherwise one repository fetch. For each target,
    /// persisted records first get a hidden primary key input, then
    /// `options.inputs` (inside a fieldset) and whatever `block` adds.
    /// `options.wrapper` and `options.tag_wrapper` apply to inputs of the
    /// nested levels that don't set their own.
    ///
    /// # Errors
    ///
    /// Returns [`ModelFormError::UnknownField`] if the current model has no
    /// such association, [`ModelFormError::UnsupportedAssociation`] for
    /// association kinds that cannot nest, and any error raised while
    /// fetching targets or by the block.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use acton_modelform::forms::{Form, FormAttrs, InputOptions, SubformOptions};
    /// use acton_modelform::model::{Association, Column, ColumnType, ModelSchema, Record};
    /// use acton_modelform::store::{MemoryStore, Repository};
    ///
    /// let mut store = MemoryStore::new();
    /// store.register(ModelSchema::new("Track", "tracks").column(Column::new("name", ColumnType::String)));
    /// let album = store.register(
    ///     ModelSchema::new("Album", "albums")
    ///         .association(Association::one_to_many("tracks", "Track", "album_id")),
    /// );
    /// let track = Record::new(store.model("Track").unwrap()).with("name", "x");
    ///
    /// let html = Form::render(Record::new(album), &store, &FormAttrs::new(), |f| {
    ///     f.subform("tracks", SubformOptions::new().obj(vec![track]), |f| {
    ///         f.add_input("name", &InputOptions::new())
    ///     })
    /// })
    /// .unwrap();
    /// assert!(html.contains(r#"name="album[tracks_attributes][0][name]""#));
    /// ```
    pub fn subform<F>(&mut self, association: &str, options: SubformOptions, mut block: F) -> Result<()>
    where
        F: FnMut(&mut Self) -> Result<()>,
    {
        let parent = self.scope();
        let model = Arc::clone(parent.record.model());
        let association = model
            .association_named(association)
            .ok_or_else(|| ModelFormError::UnknownField {
                model: model.name().to_owned(),
                field: association.to_owned(),
                path: parent.name.clone(),
            })?;
        if let AssociationKind::Other(kind) = &association.kind {
            return Err(ModelFormError::UnsupportedAssociation {
                model: model.name().to_owned(),
                association: association.name.clone(),
                kind: kind.clone(),
            });
        }

        let (targets, indexed) = self.targets(association, options.obj.clone())?;
        for (i, record) in targets.into_iter().enumerate() {
            let index = indexed.then_some(i);
            let parent = self.scope();
            let (name, id) = nested_prefixes(&parent.name, &parent.id, &association.name, index);
            let wrapper = options.wrapper.clone().or_else(|| parent.wrapper.clone());
            let tag_wrapper = options
                .tag_wrapper
                .clone()
                .or_else(|| parent.tag_wrapper.clone());
            self.scopes.push(Scope {
                record,
                name,
                id,
                wrapper,
                tag_wrapper,
            });
            let result = self.subform_level(association, &options, index, &mut block);
            self.scopes.pop();
            result?;
        }
        Ok(())
    }

    /// [`Form::subform`] without a block, for use with `options.inputs`
    ///
    /// # Errors
    ///
    /// Same as [`Form::subform`].
    pub fn subform_inputs(&mut self, association: &str, options: SubformOptions) -> Result<()> {
        self.subform(association, options, |_| Ok(()))
    }

    /// Target records, and whether their levels are indexed
    ///
    /// To-many associations are always indexed, and so is a list passed
    /// as `obj` whatever the association kind.
    fn targets(
        &self,
        association: &Association,
        obj: Option<SubformObject>,
    ) -> Result<(Vec<Record>, bool)> {
        let to_many = association.kind.is_to_many();
        let (source, targets, indexed) = match obj {
            Some(SubformObject::One(record)) => ("override", vec![record], to_many),
            Some(SubformObject::Many(records)) => ("override", records, true),
            None => {
                let record = &self.scope().record;
                match record.cached_association(&association.name) {
                    Some(cached) => ("cached", cached.clone().into_records(), to_many),
                    None => (
                        "fetched",
                        self.repo.associated(record, association)?.into_records(),
                        to_many,
                    ),
                }
            }
        };
        debug!(
            association = %association.name,
            kind = %association.kind,
            source,
            count = targets.len(),
            indexed,
            "resolved subform targets"
        );
        Ok((targets, indexed))
    }

    fn subform_level<F>(
        &mut self,
        association: &Association,
        options: &SubformOptions,
        index: Option<usize>,
        block: &mut F,
    ) -> Result<()>
    where
        F: FnMut(&mut Self) -> Result<()>,
    {
        if let Some(hidden) = self.hidden_pk() {
            self.body.push(hidden);
        }

        let Some(fields) = &options.inputs else {
            return block(self);
        };
        let start = self.body.len();
        let opts = InputOptions::default();
        for field in fields {
            self.add_input(field, &opts)?;
        }
        block(self)?;
        let children = self.body.split_off(start);

        let legend = match &options.legend {
            Some(legend) => legend.text_for(self.record(), index),
            None => default_legend(association, index),
        };
        let fieldset = Tag::new("fieldset")
            .attr("class", self.options.config.inputs.fieldset_class.as_str())
            .child(Tag::new("legend").child(legend))
            .children(children);
        self.body.push(fieldset.into());
        Ok(())
    }

    /// Hidden primary key input of the current level, for persisted records
    fn hidden_pk(&self) -> Option<Node> {
        let scope = self.scope();
        let pk = scope.record.pk()?.to_form_value()?;
        let column = scope.record.model().primary_key();
        Some(
            Tag::new("input")
                .attr("id", scope.field_id(column))
                .attr("name", scope.field_name(column))
                .attr("type", "hidden")
                .attr("value", pk)
                .into(),
        )
    }
}

/// Name and id prefixes of a nested level
fn nested_prefixes(name: &str, id: &str, association: &str, index: Option<usize>) -> (String, String) {
    let name = format!("{name}[{association}_attributes]");
    let id = format!("{id}_{association}_attributes");
    match index {
        Some(i) => (format!("{name}[{i}]"), format!("{id}_{i}")),
        None => (name, id),
    }
}

fn default_legend(association: &Association, index: Option<usize>) -> String {
    match index {
        Some(i) => format!("{} #{}", humanize(&singular(&association.name)), i + 1),
        None => humanize(&association.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_legend() {
        let artist = Association::many_to_one("artist", "Artist", "artist_id");
        assert_eq!(default_legend(&artist, None), "Artist");

        let tracks = Association::one_to_many("tracks", "Track", "album_id");
        assert_eq!(default_legend(&tracks, Some(0)), "Track #1");
        assert_eq!(default_legend(&tracks, Some(9)), "Track #10");
    }

    #[test]
    fn test_nested_prefixes() {
        assert_eq!(
            nested_prefixes("album", "album", "artist", None),
            ("album[artist_attributes]".to_string(), "album_artist_attributes".to_string())
        );
        assert_eq!(
            nested_prefixes("artist[albums_attributes][0]", "artist_albums_attributes_0", "tracks", Some(1)),
            (
                "artist[albums_attributes][0][tracks_attributes][1]".to_string(),
                "artist_albums_attributes_0_tracks_attributes_1".to_string()
            )
        );
    }

    proptest! {
        #[test]
        fn prop_nested_names_are_injective(
            a in "[a-z]{1,8}", i in proptest::option::of(0usize..50),
            b in "[a-z]{1,8}", j in proptest::option::of(0usize..50),
        ) {
            let (left, _) = nested_prefixes("album", "album", &a, i);
            let (right, _) = nested_prefixes("album", "album", &b, j);
            prop_assert_eq!(left == right, a == b && i == j);
        }
    }
}
