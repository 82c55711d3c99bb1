//! `[img]` section configuration.
//!
//! ```toml
//! [img]
//! base_path = "assets/img/"
//! [img.files]
//! logo = "brand/logo-{LANG}.png"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::asset::is_valid_alias;
use crate::config::{ConfigDiagnostics, FieldPath};

/// Image aliases. No dependency semantics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSection {
    #[serde(alias = "basePath")]
    pub base_path: String,

    /// Alias → path relative to `base_path`.
    pub files: BTreeMap<String, String>,
}

impl ImageSection {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let root = FieldPath::new("img.files");
        for alias in self.files.keys() {
            if !is_valid_alias(alias) {
                diag.error_with_hint(
                    root.join(alias),
                    format!("invalid alias '{alias}'"),
                    "only alphanumeric, `-` and `.` characters are allowed",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_image_aliases() {
        let section: ImageSection = toml::from_str(
            r#"
            base_path = "assets/img"
            [files]
            logo = "logo.png"
            "-" = "dash.png"
            "#,
        )
        .unwrap();

        let mut diag = ConfigDiagnostics::new();
        section.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field.as_str(), "img.files.-");
    }
}
