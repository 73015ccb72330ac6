//! The document tree handed over by the content service.
//!
//! Field names follow the service's JSON. Optional and null fields degrade to
//! empty values so the renderer never has to fail on a sparse tree.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Negative offsets (`-1` marks "no place in the text") read as absent.
fn offset_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let offset = Option::<i64>::deserialize(deserializer)?;
    Ok(offset.and_then(|offset| usize::try_from(offset).ok()))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DivisionType {
    #[serde(alias = "volume")]
    Volume,
    #[serde(alias = "chapter")]
    Chapter,
    #[serde(alias = "section")]
    Section,
    #[serde(alias = "paragraph")]
    Paragraph,
    #[serde(alias = "annotation")]
    Annotation,
}

impl DivisionType {
    /// Volumes and chapters are divisions; everything else is a content piece.
    pub fn is_container(self) -> bool {
        matches!(self, DivisionType::Volume | DivisionType::Chapter)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Title {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
}

impl Title {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Dynasty {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Author {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// 著, 辑, 注, 译, 校 or 引; rendered as 著 when empty.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub dynasty: Option<Dynasty>,
    #[serde(rename = "officialPosition", default)]
    pub official_position: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub life: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Book {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: Title,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub dynasty: Option<Dynasty>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub divisions: Vec<Division>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Division {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i64,
    #[serde(default)]
    pub title: Option<Title>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<Author>,
    #[serde(rename = "type")]
    pub kind: DivisionType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub divisions: Vec<DivisionChild>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub collapse: bool,
}

impl Division {
    pub fn new(id: impl Into<String>, kind: DivisionType) -> Self {
        Self {
            id: id.into(),
            order: 0,
            title: None,
            authors: Vec::new(),
            kind,
            divisions: Vec::new(),
            collapse: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ContentPiece {
    #[serde(rename = "type")]
    pub kind: DivisionType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub annotator: Option<String>,
    /// Kind of annotation (传, 笺, 音义 …). Older trees call it `source`.
    #[serde(default, alias = "source")]
    pub authorship: Option<String>,
    /// Offset into the parent's tag-stripped content.
    #[serde(default, deserialize_with = "offset_or_none")]
    pub position: Option<usize>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_pieces: Vec<ContentPiece>,
}

impl ContentPiece {
    pub fn new(kind: DivisionType, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            annotator: None,
            authorship: None,
            position: None,
            content_pieces: Vec::new(),
        }
    }

    pub fn annotation(
        annotator: impl Into<String>,
        authorship: impl Into<String>,
        content: impl Into<String>,
        position: Option<usize>,
    ) -> Self {
        Self {
            annotator: Some(annotator.into()),
            authorship: Some(authorship.into()),
            position,
            ..Self::new(DivisionType::Annotation, content)
        }
    }

    pub fn with_children(mut self, children: Vec<ContentPiece>) -> Self {
        self.content_pieces = children;
        self
    }
}

/// An entry of `Division::divisions`: a nested division or a content piece,
/// told apart by its `type`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DivisionChild {
    Division(Division),
    Piece(ContentPiece),
}

impl DivisionChild {
    pub fn kind(&self) -> DivisionType {
        match self {
            DivisionChild::Division(division) => division.kind,
            DivisionChild::Piece(piece) => piece.kind,
        }
    }
}

impl<'de> Deserialize<'de> for DivisionChild {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .cloned()
            .ok_or_else(|| D::Error::missing_field("type"))?;
        let kind: DivisionType = serde_json::from_value(kind).map_err(D::Error::custom)?;
        if kind.is_container() {
            serde_json::from_value(value)
                .map(DivisionChild::Division)
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(DivisionChild::Piece)
                .map_err(D::Error::custom)
        }
    }
}

impl From<Division> for DivisionChild {
    fn from(division: Division) -> Self {
        DivisionChild::Division(division)
    }
}

impl From<ContentPiece> for DivisionChild {
    fn from(piece: ContentPiece) -> Self {
        DivisionChild::Piece(piece)
    }
}

/// A whole book or a single division (typically a chapter fetched by id).
#[derive(Clone, Debug, PartialEq)]
pub enum Document {
    Book(Book),
    Division(Division),
}

impl Document {
    pub fn from_json(source: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    fn from_value(value: Value) -> Result<Self> {
        let Some(object) = value.as_object() else {
            return Err(Error::UnknownDocument);
        };
        if object.contains_key("type") {
            Ok(Document::Division(serde_json::from_value(value)?))
        } else if object.contains_key("title") {
            Ok(Document::Book(serde_json::from_value(value)?))
        } else {
            Err(Error::UnknownDocument)
        }
    }
}
