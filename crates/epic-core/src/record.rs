//! Per-image metadata records as returned by the EPIC API.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Quality;

/// One metadata record. Kept as raw JSON so fields we don't use survive a
/// load/save cycle unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRecord(Value);

impl ImageRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// The `image` identifier, e.g. `epic_1b_20150601000830`.
    ///
    /// The id becomes both a local file name and a URL path segment, so ids
    /// that are not a single plain path component are rejected.
    pub fn image_id(&self) -> Result<&str> {
        let id = self
            .0
            .get("image")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("metadata record has no string `image` field: {}", self.0))?;
        if !is_plain_component(id) {
            anyhow::bail!("metadata record has unsafe `image` id: {:?}", id);
        }
        Ok(id)
    }

    /// Local (and remote) file name for this record at the given quality.
    pub fn file_name(&self, quality: Quality) -> Result<String> {
        Ok(format!("{}.{}", self.image_id()?, quality.extension()))
    }
}

/// True if `id` is usable as one file name and one URL segment: non-empty,
/// not `.` or `..`, and free of separators, NUL, control chars, `?` and `#`.
fn is_plain_component(id: &str) -> bool {
    if id.is_empty() || id == "." || id == ".." {
        return false;
    }
    !id.chars()
        .any(|c| c == '/' || c == '\\' || c == '?' || c == '#' || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn file_name_half_quality() {
        let rec = ImageRecord::new(json!({"image": "epic_1b_20150601000830"}));
        assert_eq!(
            rec.file_name(Quality::Half).unwrap(),
            "epic_1b_20150601000830.jpg"
        );
    }

    #[test]
    fn file_name_full_and_thumbs() {
        let rec = ImageRecord::new(json!({"image": "epic_1b_20150601000830", "caption": "x"}));
        assert_eq!(
            rec.file_name(Quality::Full).unwrap(),
            "epic_1b_20150601000830.png"
        );
        assert_eq!(
            rec.file_name(Quality::Thumbs).unwrap(),
            "epic_1b_20150601000830.jpg"
        );
    }

    #[test]
    fn missing_or_non_string_image_is_error() {
        let rec = ImageRecord::new(json!({"caption": "no id"}));
        assert!(rec.image_id().is_err());
        let rec = ImageRecord::new(json!({"image": 42}));
        assert!(rec.file_name(Quality::Half).is_err());
    }

    #[test]
    fn unsafe_image_ids_rejected() {
        for id in [
            "",
            ".",
            "..",
            "../../../escaped",
            "sub/epic_1b_x",
            "..\\epic_1b_x",
            "epic\0x",
            "epic_1b\nx",
            "epic_1b_x?query",
            "epic_1b_x#frag",
        ] {
            let rec = ImageRecord::new(json!({ "image": id }));
            assert!(rec.file_name(Quality::Half).is_err(), "accepted {:?}", id);
        }
    }

    #[test]
    fn dotted_ids_are_fine() {
        let rec = ImageRecord::new(json!({"image": "epic_1b_2015.v03"}));
        assert_eq!(rec.file_name(Quality::Full).unwrap(), "epic_1b_2015.v03.png");
    }

    #[test]
    fn unknown_fields_survive_serialization() {
        let raw = r#"{"image":"epic_1b_x","centroid_coordinates":{"lat":1.5,"lon":-2.0},"date":"2015-06-01 00:08:30"}"#;
        let rec: ImageRecord = serde_json::from_str(raw).unwrap();
        let back: Value = serde_json::from_str(&serde_json::to_string(&rec).unwrap()).unwrap();
        assert_eq!(&back, rec.as_json());
        assert_eq!(back["centroid_coordinates"]["lat"], json!(1.5));
    }
}
