//! Association inputs
//!
//! To-one associations edit the key that points at the target: a select
//! box (or radio set) over every target record. To-many associations edit
//! the set of linked targets: a multiple select (or checkbox set) whose
//! array field carries the chosen primary keys.

use std::collections::BTreeSet;

use super::field::{SelectOption, Widget};
use super::form::Scope;
use super::introspect::BuiltInput;
use super::naming::{display_name, humanize, name_method};
use super::options::{InputAs, InputOptions};
use super::render::{FieldContext, FieldRenderer};
use crate::config::ModelFormConfig;
use crate::error::{ModelFormError, Result};
use crate::model::{Association, AssociationKind, Value};
use crate::store::Repository;

/// Field an association input submits
///
/// `many_to_one` submits its key column, `one_to_one` submits
/// `<name>_pk`, and to-many associations submit `<singular>_pks`.
#[must_use]
pub fn association_field(association: &Association) -> String {
    match association.kind {
        AssociationKind::ManyToOne => association.key.clone(),
        AssociationKind::OneToMany | AssociationKind::ManyToMany => {
            format!("{}_pks", association.singular_name())
        }
        AssociationKind::OneToOne | AssociationKind::Other(_) => {
            format!("{}_pk", association.name)
        }
    }
}

/// `(label, value)` choices for an association input
///
/// An explicit `options` list replaces the lookup entirely. Otherwise the
/// naming method is resolved before any target row is read, then every
/// target record is listed in the association's order.
///
/// # Errors
///
/// Returns [`ModelFormError::NoNameMethod`] when the target cannot be
/// labelled, or the repository's error.
pub fn candidates(
    repo: &dyn Repository,
    association: &Association,
    opts: &InputOptions,
) -> Result<Vec<(String, String)>> {
    if let Some(options) = &opts.options {
        return Ok(options
            .iter()
            .map(|(label, value)| (label.clone(), value.to_string()))
            .collect());
    }
    let target = repo.model(&association.target)?;
    let preferred = opts
        .name_method
        .as_deref()
        .or(association.name_method.as_deref());
    let method = name_method(&target, preferred)?;
    repo.all(&target, association.order.as_deref())?
        .iter()
        .map(|record| {
            let label = display_name(record, &method, repo)?;
            let value = record.pk().map(ToString::to_string).unwrap_or_default();
            Ok((label, value))
        })
        .collect()
}

pub(crate) fn association_input(
    scope: &Scope,
    repo: &dyn Repository,
    config: &ModelFormConfig,
    association: &Association,
    opts: &InputOptions,
) -> Result<BuiltInput> {
    let selected = match &association.kind {
        AssociationKind::ManyToOne => scope
            .record
            .value(&association.key)
            .and_then(Value::to_form_value)
            .into_iter()
            .collect(),
        AssociationKind::OneToOne | AssociationKind::OneToMany | AssociationKind::ManyToMany => {
            linked_keys(scope, repo, association)?
        }
        AssociationKind::Other(kind) => {
            return Err(ModelFormError::UnsupportedAssociation {
                model: scope.record.model().name().to_owned(),
                association: association.name.clone(),
                kind: kind.clone(),
            })
        }
    };

    let choices: Vec<SelectOption> = candidates(repo, association, opts)?
        .into_iter()
        .map(|(label, value)| {
            let is_selected = selected.contains(&value);
            SelectOption::new(value, label).selected_if(is_selected)
        })
        .collect();

    let field = association_field(association);
    let to_many = association.kind.is_to_many();
    let widget = match (to_many, opts.input_as) {
        (false, Some(InputAs::Radio)) => Widget::Radios(choices),
        (false, _) => Widget::Select {
            options: choices,
            blank: true,
            multiple: false,
        },
        (true, Some(InputAs::Checkbox)) => Widget::Checkboxes(choices),
        (true, _) => Widget::Select {
            options: choices,
            blank: false,
            multiple: true,
        },
    };

    let required = opts
        .required
        .unwrap_or_else(|| association.required || key_is_not_null(scope, association));
    let name = scope.field_name(&field);
    let context = FieldContext {
        id: scope.field_id(&field),
        name: if to_many { format!("{name}[]") } else { name },
        label: opts
            .label
            .clone()
            .unwrap_or_else(|| humanize(&association.name)),
        value: None,
        required,
        error: scope.errors(&field, config),
    };

    let mut tokens = vec![association.kind.as_str().to_owned()];
    if required {
        tokens.push("required".into());
    }
    Ok(BuiltInput {
        node: FieldRenderer::new(config).render(&widget, &context, opts.tag_wrapper.as_ref()),
        tokens,
    })
}

/// A `many_to_one` whose key column forbids NULL
fn key_is_not_null(scope: &Scope, association: &Association) -> bool {
    association.kind == AssociationKind::ManyToOne
        && scope
            .record
            .model()
            .column_named(&association.key)
            .is_some_and(|column| !column.allow_null)
}

fn linked_keys(
    scope: &Scope,
    repo: &dyn Repository,
    association: &Association,
) -> Result<BTreeSet<String>> {
    Ok(scope
        .record
        .associated(&association.name, repo)?
        .records()
        .into_iter()
        .filter_map(|record| record.pk().and_then(Value::to_form_value))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, ColumnType, ModelSchema};
    use crate::store::MemoryStore;

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.register(
            ModelSchema::new("Artist", "artists").column(Column::new("name", ColumnType::String)),
        );
        store.insert("artists", [("name", "d")]);
        store.insert("artists", [("name", "a")]);
        store
    }

    #[test]
    fn test_association_field() {
        assert_eq!(
            association_field(&Association::many_to_one("artist", "Artist", "artist_id")),
            "artist_id"
        );
        assert_eq!(
            association_field(&Association::one_to_one("album_info", "AlbumInfo", "album_id")),
            "album_info_pk"
        );
        assert_eq!(
            association_field(&Association::one_to_many("tracks", "Track", "album_id")),
            "track_pks"
        );
    }

    #[test]
    fn test_candidates_follow_association_order() {
        let store = store();
        let artist = Association::many_to_one("artist", "Artist", "artist_id");
        let by_pk = candidates(&store, &artist, &InputOptions::new()).unwrap();
        assert_eq!(
            by_pk,
            vec![("d".to_string(), "1".to_string()), ("a".to_string(), "2".to_string())]
        );

        let by_name = candidates(&store, &artist.order("name"), &InputOptions::new()).unwrap();
        assert_eq!(by_name[0], ("a".to_string(), "2".to_string()));
    }

    #[test]
    fn test_options_win_over_name_method() {
        let store = store();
        let artist = Association::many_to_one("artist", "Artist", "artist_id");
        let opts = InputOptions::new()
            .options([("x", 9)])
            .name_method("does_not_exist");
        assert_eq!(
            candidates(&store, &artist, &opts).unwrap(),
            vec![("x".to_string(), "9".to_string())]
        );
    }

    #[test]
    fn test_missing_name_method() {
        let store = store();
        let artist = Association::many_to_one("artist", "Artist", "artist_id").name_method("idname");
        assert!(matches!(
            candidates(&store, &artist, &InputOptions::new()),
            Err(ModelFormError::NoNameMethod { .. })
        ));
    }
}
