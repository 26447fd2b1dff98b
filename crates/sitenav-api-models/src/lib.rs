#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the `SiteNav` REST surface.
//!
//! The remote API exposes three read-mostly collections (`sites`, `drives`,
//! `files`) using camelCase JSON. Records are treated as opaque beyond the
//! handful of fields the client renders, so every field defaults when it is
//! missing or `null` instead of failing the whole collection decode.
use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A site (top level of the hierarchy).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Stable site identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Human-readable site name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    /// Canonical browser URL for the site.
    #[serde(default, deserialize_with = "null_as_default")]
    pub web_url: String,
}

/// A document drive belonging to a site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Drive {
    /// Stable drive identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Drive display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Canonical browser URL for the drive.
    #[serde(default, deserialize_with = "null_as_default")]
    pub web_url: String,
    /// RFC 3339 timestamp of the last modification, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date_time: Option<String>,
    /// Owning site identifier, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    /// Owning site display name, when the API denormalises it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
}

/// A file stored in a drive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// Stable file identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// File name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Canonical browser URL for the file.
    #[serde(default, deserialize_with = "null_as_default")]
    pub web_url: String,
    /// Size in bytes, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// RFC 3339 timestamp of the last modification, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date_time: Option<String>,
    /// Display name of the last modifier, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by_display_name: Option<String>,
}

/// Structured error payload returned on non-2xx responses.
///
/// Servers disagree on the field name, so both `error` and `message` are
/// accepted; `error` wins when both are present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ErrorBody {
    /// Short error string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human-readable error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    /// First non-blank message carried by the payload.
    #[must_use]
    pub fn best_message(&self) -> Option<&str> {
        [self.error.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_decodes_camel_case_fields() {
        let drive: Drive = serde_json::from_str(
            r#"{"id":"D1","name":"Contracts","webUrl":"https://x/d1","lastModifiedDateTime":"2024-01-02T00:00:00Z","siteId":"S1"}"#,
        )
        .unwrap();
        assert_eq!(drive.web_url, "https://x/d1");
        assert_eq!(drive.site_id.as_deref(), Some("S1"));
        assert!(drive.site_name.is_none());
    }

    #[test]
    fn file_tolerates_missing_optional_fields() {
        let file: DriveFile = serde_json::from_str(r#"{"id":"F1","name":"a.txt"}"#).unwrap();
        assert_eq!(file.size, None);
        assert_eq!(file.web_url, "");
        assert!(file.last_modified_by_display_name.is_none());
    }

    #[test]
    fn site_lookup_without_id_decodes() {
        let site: Site = serde_json::from_str(r#"{"displayName":"Legal"}"#).unwrap();
        assert_eq!(site.display_name, "Legal");
        assert_eq!(site.id, "");
        assert_eq!(site.web_url, "");
    }

    #[test]
    fn null_text_fields_fall_back_per_record() {
        let sites: Vec<Site> = serde_json::from_str(
            r#"[{"id":"S1","displayName":null,"webUrl":null},{"id":"S2","displayName":"Fin","webUrl":"https://x/fin"}]"#,
        )
        .unwrap();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].display_name, "");
        assert_eq!(sites[1].display_name, "Fin");

        let drive: Drive = serde_json::from_str(r#"{"id":null,"name":null,"siteName":null}"#).unwrap();
        assert_eq!(drive.id, "");
        assert_eq!(drive.name, "");
        assert!(drive.site_name.is_none());

        let file: DriveFile =
            serde_json::from_str(r#"{"id":"F1","name":null,"size":null,"webUrl":null}"#).unwrap();
        assert_eq!(file.name, "");
        assert_eq!(file.size, None);
    }

    #[test]
    fn error_body_prefers_error_then_message() {
        let both = ErrorBody {
            error: Some("denied".into()),
            message: Some("not found".into()),
        };
        assert_eq!(both.best_message(), Some("denied"));

        let message_only: ErrorBody = serde_json::from_str(r#"{"message":"not found"}"#).unwrap();
        assert_eq!(message_only.best_message(), Some("not found"));

        let blank = ErrorBody {
            error: Some("  ".into()),
            message: None,
        };
        assert_eq!(blank.best_message(), None);
    }
}
