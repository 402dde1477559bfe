//! Domain types and wire DTOs for the dashboard to-do list.
//!
//! # Design
//! `TodoItem` is both the stored entity and the serialized list row; the
//! request payloads (`SaveTodo`, `ReorderRequest`) keep their loosely typed
//! wire shape and are turned into validated values (`TodoDraft`,
//! `Vec<TodoId>`) before they reach `TodoListService`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Identifier assigned by storage when an item is first inserted.
pub type TodoId = i64;

/// Input formats accepted for date-time fields, tried in order.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

/// A single entry of the to-do list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_date_time")]
    pub from: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_date_time")]
    pub to: Option<NaiveDateTime>,
    #[serde(default)]
    pub sort_order: i64,
}

impl TodoItem {
    pub fn date_range(&self) -> DateRange {
        DateRange {
            from: self.from,
            to: self.to,
        }
    }
}

/// Optional `from`/`to` bounds. `to >= from` is not enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Human-readable `d.m.Y H:i` rendering used by the list view.
    ///
    /// An open bound is shown as `…`; a range with neither bound renders as
    /// an empty string.
    pub fn display(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let bound = |value: Option<NaiveDateTime>| match value {
            Some(at) => at.format(DISPLAY_FORMAT).to_string(),
            None => "…".to_string(),
        };
        format!("{} - {}", bound(self.from), bound(self.to))
    }
}

/// A list row as served by `GET /todos`: the item plus its rendered range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoRow {
    #[serde(flatten)]
    pub item: TodoItem,
    pub date_label: String,
}

impl From<TodoItem> for TodoRow {
    fn from(item: TodoItem) -> Self {
        let date_label = item.date_range().display();
        Self { item, date_label }
    }
}

/// The `date` object of the save form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRangeInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// Request payload of the save endpoint.
///
/// `id` of `0` or `None` asks for a new item. Every field is optional at the
/// serde level so a missing title surfaces as a field error rather than a
/// body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TodoId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateRangeInput>,
}

impl SaveTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Parse the date bounds and normalize the text fields.
    ///
    /// The title is only trimmed here; the non-empty check belongs to
    /// `TodoListService::upsert`.
    pub fn into_draft(self) -> Result<TodoDraft, ValidationError> {
        let date = self.date.unwrap_or_default();
        let from = parse_date_time(date.from.as_deref())
            .map_err(|value| ValidationError::new("date.from", invalid_date_message(&value)))?;
        let to = parse_date_time(date.to.as_deref())
            .map_err(|value| ValidationError::new("date.to", invalid_date_message(&value)))?;

        Ok(TodoDraft {
            id: self.id.filter(|id| *id != 0),
            title: self.title.unwrap_or_default().trim().to_string(),
            description: normalize_optional(self.description),
            range: DateRange { from, to },
        })
    }
}

/// Validated, normalized input of an upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub id: Option<TodoId>,
    pub title: String,
    pub description: Option<String>,
    pub range: DateRange,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
            range: DateRange::default(),
        }
    }

    pub fn with_id(mut self, id: TodoId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }
}

/// Request payload of the reorder endpoint: ids joined with `,`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReorderRequest {
    #[serde(default)]
    pub data: String,
}

impl ReorderRequest {
    pub fn from_ids(ids: &[TodoId]) -> Self {
        let data = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        Self { data }
    }

    /// Split `data` into `(id, position)` pairs, position being the token's
    /// index. Blank input is an empty order. A token that is not an integer
    /// names no item: it is skipped but still consumes its position.
    pub fn positions(&self) -> Vec<(TodoId, i64)> {
        if self.data.trim().is_empty() {
            return Vec::new();
        }
        self.data
            .split(',')
            .enumerate()
            .filter_map(|(position, token)| {
                let id = token.trim().parse::<TodoId>().ok()?;
                Some((id, position as i64))
            })
            .collect()
    }
}

/// Severity tag of a toast notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastType {
    Success,
    Info,
    Warning,
    Error,
}

/// Body of a successful action endpoint.
///
/// Reorder answers with all fields absent, i.e. `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<ToastType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<TodoItem>,
}

impl ActionResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn toast(message: impl Into<String>, message_type: ToastType) -> Self {
        Self {
            message: Some(message.into()),
            message_type: Some(message_type),
            item: None,
        }
    }

    pub fn with_item(mut self, item: TodoItem) -> Self {
        self.item = Some(item);
        self
    }
}

/// Parse an optional date-time string; `Err` carries the rejected input.
pub fn parse_date_time(raw: Option<&str>) -> Result<Option<NaiveDateTime>, String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    for format in DATE_TIME_FORMATS {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(at));
        }
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(Some)
        .ok_or_else(|| raw.to_string())
}

fn invalid_date_message(value: &str) -> String {
    format!("`{value}` is not a valid date.")
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn lenient_date_time<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    parse_date_time(raw.as_deref())
        .map_err(|value| serde::de::Error::custom(invalid_date_message(&value)))
}
