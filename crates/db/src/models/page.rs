//! Page entity model and DTOs.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use quill_core::types::{DbId, Timestamp};

/// A page row from the `pages` table.
///
/// `current_version` is the number of the version currently marked latest in
/// the `page_versions` ledger; `total_versions` counts every version ever
/// written for this page. Reverts append, so neither ever decreases.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub space_id: DbId,
    pub parent_id: Option<DbId>,
    pub title: String,
    pub current_version: i32,
    pub total_versions: i32,
    pub created_by: Option<DbId>,
    pub last_edited_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A page together with its latest version's content, returned by single-page
/// reads.
#[derive(Debug, Serialize)]
pub struct PageWithContent {
    #[serde(flatten)]
    pub page: Page,
    pub content: String,
}

/// DTO for creating a new page (with its initial content as version 1).
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePage {
    pub space_id: DbId,
    pub parent_id: Option<DbId>,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// DTO for updating an existing page.
///
/// Omitted fields are left untouched. `content` present-but-empty is a valid
/// edit (clears the page and still appends a version). `parent_id` is
/// tri-state: absent = leave alone, `null` = promote to root, id = re-parent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePage {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<DbId>>,
    pub edit_summary: Option<String>,
}

/// DTO for re-parenting a page. `parent_id: null` promotes to root.
#[derive(Debug, Clone, Deserialize)]
pub struct MovePage {
    pub parent_id: Option<DbId>,
}

/// Deserialize a field so that "absent" and "explicit null" stay distinct:
/// absent stays `None` (via `#[serde(default)]`), present-null becomes
/// `Some(None)`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_id_absent_is_none() {
        let dto: UpdatePage = serde_json::from_str(r#"{"title": "t"}"#).unwrap();
        assert_eq!(dto.parent_id, None);
    }

    #[test]
    fn parent_id_null_is_some_none() {
        let dto: UpdatePage = serde_json::from_str(r#"{"parent_id": null}"#).unwrap();
        assert_eq!(dto.parent_id, Some(None));
    }

    #[test]
    fn parent_id_value_is_some_some() {
        let dto: UpdatePage = serde_json::from_str(r#"{"parent_id": 7}"#).unwrap();
        assert_eq!(dto.parent_id, Some(Some(7)));
    }

    #[test]
    fn empty_content_is_distinct_from_absent() {
        let absent: UpdatePage = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(absent.content, None);

        let empty: UpdatePage = serde_json::from_str(r#"{"content": ""}"#).unwrap();
        assert_eq!(empty.content, Some(String::new()));
    }
}
