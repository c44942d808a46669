//! Property tests over generated catalogues

use std::collections::BTreeSet;

use acton_modelform::forms::{Form, FormAttrs, InputOptions, SubformOptions};
use acton_modelform::model::{Association, Column, ColumnType, ModelSchema, Record, Value};
use acton_modelform::store::MemoryStore;
use proptest::prelude::*;

fn tagged_store(tags: usize, linked: &BTreeSet<usize>) -> (MemoryStore, Value) {
    let mut store = MemoryStore::new();
    store.register(ModelSchema::new("Tag", "tags").column(Column::new("name", ColumnType::String)));
    store.register(
        ModelSchema::new("Album", "albums")
            .column(Column::new("name", ColumnType::String))
            .association(Association::many_to_many(
                "tags",
                "Tag",
                "albums_tags",
                "album_id",
                "tag_id",
            )),
    );
    let album = store.insert("albums", [("name", "b")]);
    for i in 0..tags {
        let tag = store.insert("tags", [("name", format!("tag{i}"))]);
        if linked.contains(&i) {
            store.link("albums_tags", album.clone(), tag);
        }
    }
    (store, album)
}

proptest! {
    #[test]
    fn prop_exactly_linked_tags_are_selected(
        mask in proptest::collection::vec(any::<bool>(), 1..12)
    ) {
        let tags = mask.len();
        let linked: BTreeSet<usize> = (0..tags).filter(|&i| mask[i]).collect();
        let (store, album) = tagged_store(tags, &linked);
        let record = store.find("Album", album).unwrap();
        let html = Form::new(record, &store)
            .input("tags", &InputOptions::new())
            .unwrap()
            .to_string();

        prop_assert_eq!(html.matches("<option").count(), tags);
        prop_assert_eq!(html.matches(r#"selected="selected""#).count(), linked.len());
        for i in &linked {
            let selected = format!(r#"<option selected="selected" value="{}">tag{i}</option>"#, i + 1);
            prop_assert!(html.contains(&selected), "missing {}", selected);
        }
    }

    #[test]
    fn prop_text_values_stay_inside_their_attribute(value in any::<String>()) {
        let mut store = MemoryStore::new();
        let album = store.register(
            ModelSchema::new("Album", "albums").column(Column::new("name", ColumnType::String)),
        );
        let record = Record::new(album).with("name", value.as_str());
        let html = Form::new(record, &store)
            .input("name", &InputOptions::new())
            .unwrap()
            .to_string();

        // four attributes, one pair of quotes each
        prop_assert_eq!(html.matches('"').count(), 8);
        prop_assert_eq!(html.matches('<').count(), 3);
    }

    #[test]
    fn prop_one_level_per_persisted_track(names in proptest::collection::vec("[a-z]{1,6}", 0..8)) {
        let mut store = MemoryStore::new();
        store.register(ModelSchema::new("Track", "tracks").column(Column::new("name", ColumnType::String)));
        store.register(
            ModelSchema::new("Album", "albums")
                .association(Association::one_to_many("tracks", "Track", "album_id")),
        );
        let album = store.insert("albums", [("name", "b")]);
        for name in &names {
            store.insert("tracks", [("name", Value::from(name.as_str())), ("album_id", album.clone())]);
        }
        let record = store.find("Album", album).unwrap();
        let html = Form::render(record, &store, &FormAttrs::new(), |f| {
            f.subform("tracks", SubformOptions::new(), |f| f.add_input("name", &InputOptions::new()))
        })
        .unwrap();

        prop_assert_eq!(html.matches(r#"type="hidden""#).count(), names.len());
        for (i, name) in names.iter().enumerate() {
            let input = format!(
                r#"<input id="album_tracks_attributes_{i}_name" name="album[tracks_attributes][{i}][name]" type="text" value="{name}"/>"#
            );
            prop_assert!(html.contains(&input), "missing {}", input);
        }
    }

    #[test]
    fn prop_tri_state_select_marks_matching_option(state in proptest::option::of(any::<bool>())) {
        let mut store = MemoryStore::new();
        let album = store.register(
            ModelSchema::new("Album", "albums").column(Column::new("gold", ColumnType::Boolean)),
        );
        let record = Record::load(album, 1).with("gold", Value::from(state));
        let html = Form::new(record, &store)
            .input("gold", &InputOptions::new())
            .unwrap()
            .to_string();

        let t = if state == Some(true) { r#"selected="selected" "# } else { "" };
        let f = if state == Some(false) { r#"selected="selected" "# } else { "" };
        let expected = format!(
            r#"<option value=""></option><option {t}value="t">True</option><option {f}value="f">False</option>"#
        );
        prop_assert!(html.contains(&expected), "{}", html);
        prop_assert_eq!(html.matches("<option").count(), 3);
    }

    #[test]
    fn prop_dual_state_checkbox_pairs(checked in any::<bool>()) {
        let mut store = MemoryStore::new();
        let album = store.register(
            ModelSchema::new("Album", "albums")
                .column(Column::new("platinum", ColumnType::Boolean).not_null().default_value(false)),
        );
        let record = Record::load(album, 1).with("platinum", checked);
        let html = Form::new(record, &store)
            .input("platinum", &InputOptions::new())
            .unwrap()
            .to_string();

        prop_assert_eq!(html.matches(r#"type="hidden" value="f""#).count(), 1);
        prop_assert_eq!(html.matches(r#"type="checkbox" value="t""#).count(), 1);
        prop_assert_eq!(html.contains("checked=\"checked\""), checked);
        prop_assert!(html.find("hidden").unwrap() < html.find("checkbox").unwrap());
    }

    #[test]
    fn prop_hidden_key_iff_persisted(persisted in proptest::collection::vec(any::<bool>(), 0..8)) {
        let mut store = MemoryStore::new();
        let track = store.register(
            ModelSchema::new("Track", "tracks").column(Column::new("name", ColumnType::String)),
        );
        let album = store.register(
            ModelSchema::new("Album", "albums")
                .association(Association::one_to_many("tracks", "Track", "album_id")),
        );
        let targets: Vec<Record> = persisted
            .iter()
            .enumerate()
            .map(|(i, &loaded)| {
                let record = if loaded {
                    Record::load(track.clone(), i64::try_from(i).unwrap() + 100)
                } else {
                    Record::new(track.clone())
                };
                record.with("name", format!("t{i}"))
            })
            .collect();
        let html = Form::render(Record::new(album), &store, &FormAttrs::new(), |f| {
            f.subform("tracks", SubformOptions::new().obj(targets), |f| {
                f.add_input("name", &InputOptions::new())
            })
        })
        .unwrap();

        for (i, &loaded) in persisted.iter().enumerate() {
            let hidden = format!(r#"name="album[tracks_attributes][{i}][id]""#);
            prop_assert_eq!(html.contains(&hidden), loaded);
        }
    }

    #[test]
    fn prop_rendering_is_idempotent(name in "[ -~]{0,16}", state in proptest::option::of(any::<bool>())) {
        let mut store = MemoryStore::new();
        let album = store.register(
            ModelSchema::new("Album", "albums")
                .column(Column::new("name", ColumnType::String).not_null())
                .column(Column::new("gold", ColumnType::Boolean)),
        );
        let mut record = Record::load(album, 1)
            .with("name", name.as_str())
            .with("gold", Value::from(state));
        record.errors_mut().add("name", "is invalid");

        let render = || {
            Form::render(record.clone(), &store, &FormAttrs::new(), |f| {
                f.add_inputs(["name", "gold"])
            })
            .unwrap()
        };
        prop_assert_eq!(render(), render());
    }
}
