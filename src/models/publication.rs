use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_nullable, deserialize_nullable_string};

/// An `{ id, attributes }` record as the CMS nests them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry<T> {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub attributes: T,
}

/// Single-valued relation: `{ data: Entry | null }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Relation<T> {
    #[serde(default)]
    pub data: Option<Entry<T>>,
}

impl<T> Default for Relation<T> {
    fn default() -> Self {
        Self { data: None }
    }
}

/// Multi-valued relation: `{ data: [Entry, ...] }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RelationMany<T> {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub data: Vec<Entry<T>>,
}

impl<T> Default for RelationMany<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageAttributes {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TagAttributes {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
}

/// Fields projected by the `fields` query parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicationAttributes {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub title: String,
    /// Raw HTML body as authored in the CMS
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub content: String,
    #[serde(default)]
    pub custom_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub image: Relation<ImageAttributes>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub tags: RelationMany<TagAttributes>,
}

/// A single article as returned by the publications endpoint.
///
/// Read-only: the viewer replaces whole pages of these on navigation and
/// never edits one in place.
pub type Publication = Entry<PublicationAttributes>;

impl Publication {
    pub fn title(&self) -> &str {
        &self.attributes.title
    }

    pub fn content(&self) -> &str {
        &self.attributes.content
    }

    /// Cover image URL, if the image relation is populated and non-empty.
    pub fn image_url(&self) -> Option<&str> {
        self.attributes
            .image
            .data
            .as_ref()
            .and_then(|entry| entry.attributes.url.as_deref())
            .filter(|url| !url.is_empty())
    }

    pub fn tag_names(&self) -> Vec<&str> {
        self.attributes
            .tags
            .data
            .iter()
            .map(|tag| tag.attributes.name.as_str())
            .filter(|name| !name.is_empty())
            .collect()
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.attributes.published_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.attributes.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_publication() -> serde_json::Value {
        json!({
            "id": 42,
            "attributes": {
                "title": "Markets open higher",
                "content": "<p>Body</p>",
                "customDate": "2024-03-01",
                "createdAt": "2024-03-01T08:00:00.000Z",
                "publishedAt": "2024-03-01T09:00:00.000Z",
                "updatedAt": "2024-03-01T11:30:00.000Z",
                "image": { "data": { "id": 7, "attributes": { "url": "https://cdn.test/a.jpg" } } },
                "tags": { "data": [
                    { "id": 1, "attributes": { "name": "stocks" } },
                    { "id": "2", "attributes": { "name": "europe" } }
                ] }
            }
        })
    }

    #[test]
    fn test_deserialize_full_publication() {
        let publication: Publication = serde_json::from_value(full_publication()).unwrap();
        assert_eq!(publication.id, "42");
        assert_eq!(publication.title(), "Markets open higher");
        assert_eq!(publication.content(), "<p>Body</p>");
        assert_eq!(publication.image_url(), Some("https://cdn.test/a.jpg"));
        assert_eq!(publication.tag_names(), vec!["stocks", "europe"]);
        assert_eq!(
            publication.attributes.custom_date.as_deref(),
            Some("2024-03-01")
        );
        assert!(publication.published_at().is_some());
        assert!(publication.updated_at().unwrap() > publication.published_at().unwrap());
    }

    #[test]
    fn test_deserialize_null_relations() {
        let publication: Publication = serde_json::from_value(json!({
            "id": 1,
            "attributes": {
                "title": null,
                "content": null,
                "image": { "data": null },
                "tags": null
            }
        }))
        .unwrap();

        assert_eq!(publication.title(), "");
        assert_eq!(publication.content(), "");
        assert_eq!(publication.image_url(), None);
        assert!(publication.tag_names().is_empty());
        assert!(publication.published_at().is_none());
    }

    #[test]
    fn test_deserialize_missing_attributes_fields() {
        let publication: Publication =
            serde_json::from_value(json!({ "id": "abc", "attributes": {} })).unwrap();
        assert_eq!(publication.id, "abc");
        assert_eq!(publication.image_url(), None);
        assert!(publication.tag_names().is_empty());
    }

    #[test]
    fn test_empty_image_url_is_none() {
        let publication: Publication = serde_json::from_value(json!({
            "id": 3,
            "attributes": { "image": { "data": { "id": 1, "attributes": { "url": "" } } } }
        }))
        .unwrap();
        assert_eq!(publication.image_url(), None);
    }
}
