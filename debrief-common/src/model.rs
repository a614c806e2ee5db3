//! Debrief record data model
//!
//! A debrief is a trip report: free-text paragraphs and tables, follow-up
//! tasks, and lessons learned. These types are the parsed inbound shape and
//! also the payload handed to the persistence gateway.
//!
//! **Nullability:** top-level fields are all `Option` so that `null` and an
//! absent key parse identically and are rejected later by
//! [`crate::validate::ensure_complete`], which names the offending field.
//! Nested strings, lists and flags read `null` as empty.
//! Identifier fields always serialize, as `null` once cleared, so the
//! backend receives an explicit "mint a new id" rather than an omission.

use serde::{Deserialize, Deserializer, Serialize};

/// Persistent identifier assigned by the backend
pub type Identifier = String;

/// Top-level debrief record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebriefInput {
    #[serde(default)]
    pub id: Option<Identifier>,
    #[serde(default)]
    pub title: Option<String>,
    /// Zoned timestamp, see [`crate::timestamp`]
    #[serde(default)]
    pub date: Option<String>,
    /// Predicted tags, each followed by `", "`
    #[serde(default)]
    pub labels: Option<String>,
    #[serde(default)]
    pub content_items: Option<ContentItems>,
    #[serde(default)]
    pub tasks: Option<Vec<Task>>,
    #[serde(default)]
    pub lessons: Option<Vec<Lesson>>,
    /// Author of the debrief; forwarded untouched
    #[serde(default)]
    pub user: Option<Identifier>,
}

impl DebriefInput {
    /// Parse a raw JSON body into a typed record
    ///
    /// Any JSON that is not an object of the expected field types is rejected
    /// here, before any network call is made.
    pub fn from_json(body: &[u8]) -> crate::Result<Self> {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(crate::Error::InvalidInput("Invalid request body".to_string()));
        }
        serde_json::from_slice(body)
            .map_err(|e| crate::Error::InvalidInput(format!("Invalid request body: {}", e)))
    }

    /// Lessons as a slice, treating an absent list as empty
    pub fn lessons(&self) -> &[Lesson] {
        self.lessons.as_deref().unwrap_or_default()
    }

    /// Top-level tasks as a slice, treating an absent list as empty
    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_deref().unwrap_or_default()
    }
}

/// Read `null` the same way as an absent key
///
/// Browser clients send `null` for empty nested lists and blank bullets;
/// those count as empty rather than rejecting the whole body.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Free-text and tabular content of a debrief
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItems {
    #[serde(default)]
    pub paragraphs: Option<Vec<Paragraph>>,
    #[serde(default)]
    pub tables: Option<Vec<Table>>,
}

/// Named section of bullet comments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    #[serde(default)]
    pub id: Option<Identifier>,
    /// Section name, matched case-insensitively by the section extractor
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
}

/// Single bullet inside a paragraph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: Option<Identifier>,
    /// Display position; storage does not guarantee ordering
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bullet: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub id: Option<Identifier>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<Column>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(default)]
    pub id: Option<Identifier>,
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub id: Option<Identifier>,
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    #[serde(default)]
    pub id: Option<Identifier>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

/// Follow-up action item, top-level or attached to a lesson
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: Option<Identifier>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    /// Assignee
    #[serde(default)]
    pub user: Option<Identifier>,
}

/// Lesson learned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(default)]
    pub id: Option<Identifier>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: Vec<Task>,
    /// Assigned from the enrichment response by list position
    #[serde(default)]
    pub cluster: Option<String>,
}
