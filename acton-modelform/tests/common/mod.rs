//! Shared fixtures: a small music catalogue
//!
//! Artists `a` (1) and `d` (2); albums `b` (1, by `a`) and `c` (2, by
//! `d`); tracks `m`, `n` on `b` and `o` on `c`; tags `s`, `t`, `u` with
//! `b` tagged `s`, `t` and `c` tagged `t`.

#![allow(dead_code)]

use std::sync::Arc;

use acton_modelform::model::{
    Associated, Association, Column, ColumnType, ModelSchema, Record, Value,
};
use acton_modelform::store::{MemoryStore, Repository};
use chrono::{NaiveDate, TimeZone, Utc};

/// Model definitions, adjustable before building a catalogue
pub struct Schemas {
    pub artist: ModelSchema,
    pub album: ModelSchema,
    pub album_info: ModelSchema,
    pub track: ModelSchema,
    pub tag: ModelSchema,
}

impl Schemas {
    pub fn standard() -> Self {
        let artist = ModelSchema::new("Artist", "artists")
            .column(Column::new("name", ColumnType::String))
            .association(Association::one_to_many("albums", "Album", "artist_id"))
            .method("idname", |record, _| {
                let id = record.pk().map(ToString::to_string).unwrap_or_default();
                let name = record.value("name").map(ToString::to_string).unwrap_or_default();
                Ok(Some(Value::from(format!("{id}{name}"))))
            });

        let album = ModelSchema::new("Album", "albums")
            .column(Column::new("artist_id", ColumnType::Integer))
            .column(Column::new("name", ColumnType::String))
            .column(Column::new("gold", ColumnType::Boolean))
            .column(
                Column::new("platinum", ColumnType::Boolean)
                    .not_null()
                    .default_value(false),
            )
            .column(Column::new("release_date", ColumnType::Date))
            .column(Column::new("created_at", ColumnType::DateTime))
            .column(Column::new("copies_sold", ColumnType::Integer))
            .association(Association::many_to_one("artist", "Artist", "artist_id").order("name"))
            .association(Association::one_to_one("album_info", "AlbumInfo", "album_id"))
            .association(Association::one_to_many("tracks", "Track", "album_id"))
            .association(Association::many_to_many(
                "tags",
                "Tag",
                "albums_tags",
                "album_id",
                "tag_id",
            ))
            .method("artist_name", |record, repo| {
                let artist = record.associated("artist", repo)?.into_records();
                Ok(artist.first().and_then(|a| a.value("name").cloned()))
            });

        let album_info = ModelSchema::new("AlbumInfo", "album_infos")
            .column(Column::new("album_id", ColumnType::Integer))
            .column(Column::new("info", ColumnType::String));

        let track = ModelSchema::new("Track", "tracks")
            .column(Column::new("album_id", ColumnType::Integer))
            .column(Column::new("name", ColumnType::String));

        let tag = ModelSchema::new("Tag", "tags").column(Column::new("name", ColumnType::String));

        Self {
            artist,
            album,
            album_info,
            track,
            tag,
        }
    }
}

/// A populated store plus the two albums most tests render
pub struct Catalog {
    pub store: MemoryStore,
    pub album_b: Record,
    pub album_c: Record,
}

impl Catalog {
    pub fn model(&self, name: &str) -> Arc<ModelSchema> {
        self.store.model(name).unwrap()
    }

    pub fn new_record(&self, model: &str) -> Record {
        Record::new(self.model(model))
    }
}

pub fn catalog() -> Catalog {
    catalog_from(Schemas::standard())
}

pub fn catalog_from(schemas: Schemas) -> Catalog {
    let mut store = MemoryStore::new();
    store.register(schemas.artist);
    store.register(schemas.album);
    store.register(schemas.album_info);
    store.register(schemas.track);
    store.register(schemas.tag);

    let a = store.insert("artists", [("name", "a")]);
    let d = store.insert("artists", [("name", "d")]);

    let created_at = Utc.with_ymd_and_hms(2011, 6, 5, 0, 0, 0).unwrap();
    let b = store.insert(
        "albums",
        [
            ("name", Value::from("b")),
            ("artist_id", a),
            ("gold", Value::from(false)),
            ("platinum", Value::from(false)),
            ("release_date", Value::from(NaiveDate::from_ymd_opt(2011, 6, 5).unwrap())),
            ("created_at", Value::from(created_at)),
            ("copies_sold", Value::from(10)),
        ],
    );
    store.insert(
        "tracks",
        [("name", Value::from("m")), ("album_id", b.clone())],
    );
    store.insert(
        "tracks",
        [("name", Value::from("n")), ("album_id", b.clone())],
    );
    let c = store.insert(
        "albums",
        [
            ("name", Value::from("c")),
            ("artist_id", d),
            ("gold", Value::from(true)),
            ("platinum", Value::from(true)),
        ],
    );
    store.insert(
        "tracks",
        [("name", Value::from("o")), ("album_id", c.clone())],
    );

    let s = store.insert("tags", [("name", "s")]);
    let t = store.insert("tags", [("name", "t")]);
    store.insert("tags", [("name", "u")]);
    store.link("albums_tags", b.clone(), s);
    store.link("albums_tags", b.clone(), t.clone());
    store.link("albums_tags", c.clone(), t);

    let album_b = store.find("Album", b).unwrap();
    let album_c = store.find("Album", c).unwrap();
    Catalog {
        store,
        album_b,
        album_c,
    }
}

/// Pre-load a to-many association with new records
pub fn new_records(catalog: &Catalog, model: &str, names: &[&str]) -> Associated {
    Associated::Many(
        names
            .iter()
            .map(|name| catalog.new_record(model).with("name", *name))
            .collect(),
    )
}
