//! HTML tags for the requested stylesheets and scripts.
//!
//! In production the layout gets one tag per kind pointing at the cached
//! bundle; in development (or when bundling is unavailable) one tag per
//! resolved source file, dependencies first.

use super::error::Result;
use super::{AssetKind, AssetManager};
use crate::core::BuildMode;
use crate::utils::path::{is_external_link, strip_leading_slash, with_trailing_slash};

impl AssetManager {
    /// Root-relative paths to emit for `kind` under `mode`.
    pub fn emitted_paths(&self, kind: AssetKind, mode: BuildMode) -> Result<Vec<String>> {
        if !mode.is_dev()
            && let Some(bundle) = self.resolve_minified_path(kind)?
        {
            return Ok(vec![bundle]);
        }

        let resolved = self.resolve_paths(kind)?;
        Ok(resolved.iter().map(|a| a.path.clone()).collect())
    }

    /// `<link>`/`<script>` tags for `kind`, one per line.
    ///
    /// `base_url` is prefixed to every path. Images have no tags.
    pub fn tags(&self, kind: AssetKind, mode: BuildMode, base_url: &str) -> Result<String> {
        if kind == AssetKind::Image {
            return Ok(String::new());
        }

        let tags: Vec<String> = self
            .emitted_paths(kind, mode)?
            .iter()
            .map(|path| render_tag(kind, &href(base_url, path)))
            .collect();
        Ok(tags.join("\n"))
    }
}

fn href(base_url: &str, path: &str) -> String {
    if is_external_link(path) {
        return path.to_string();
    }
    let base = with_trailing_slash(base_url);
    let base = if base.is_empty() { "/".to_string() } else { base };
    format!("{base}{}", strip_leading_slash(path))
}

fn render_tag(kind: AssetKind, href: &str) -> String {
    let href = escape_attr(href);
    match kind {
        AssetKind::Css => {
            format!(r#"<link type="text/css" rel="stylesheet" href="{href}" />"#)
        }
        _ => format!(r#"<script type="text/javascript" src="{href}"></script>"#),
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetCatalog;
    use crate::asset::minify::{AssetMinifier, MinifyError};
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct Concat;

    impl AssetMinifier for Concat {
        fn minify_css(&self, files: &[&str], _root: &Path) -> Result<Vec<u8>, MinifyError> {
            Ok(files.join(",").into_bytes())
        }

        fn minify_js(&self, files: &[&str], _root: &Path) -> Result<Vec<u8>, MinifyError> {
            Ok(files.join(",").into_bytes())
        }
    }

    fn manager() -> (TempDir, AssetManager) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("css")).unwrap();
        fs::create_dir_all(root.join("js")).unwrap();
        fs::create_dir_all(root.join("min")).unwrap();
        fs::write(root.join("css/a.css"), "a{}").unwrap();
        fs::write(root.join("css/b.css"), "b{}").unwrap();
        fs::write(root.join("js/app.js"), "app()").unwrap();

        let mut catalog = AssetCatalog::new(root).unwrap();
        catalog.add_alias(AssetKind::Css, "a", "css/a.css", &[] as &[&str]).unwrap();
        catalog.add_alias(AssetKind::Css, "b", "css/b.css", &["a"]).unwrap();
        catalog.add_alias(AssetKind::Js, "app", "js/app.js", &[] as &[&str]).unwrap();

        let mut m = AssetManager::new(Arc::new(catalog));
        m.add_css("b");
        m.add_js("app");
        (dir, m)
    }

    #[test]
    fn test_development_tags() {
        let (_dir, m) = manager();
        let css = m.tags(AssetKind::Css, BuildMode::DEVELOPMENT, "").unwrap();
        assert_eq!(
            css,
            "<link type=\"text/css\" rel=\"stylesheet\" href=\"/css/a.css\" />\n\
             <link type=\"text/css\" rel=\"stylesheet\" href=\"/css/b.css\" />"
        );

        let js = m.tags(AssetKind::Js, BuildMode::DEVELOPMENT, "https://cdn.example.com/app").unwrap();
        assert_eq!(
            js,
            r#"<script type="text/javascript" src="https://cdn.example.com/app/js/app.js"></script>"#
        );
        assert!(m.tags(AssetKind::Image, BuildMode::DEVELOPMENT, "").unwrap().is_empty());
    }

    #[test]
    fn test_production_without_bundling_falls_back() {
        let (_dir, m) = manager();
        let paths = m.emitted_paths(AssetKind::Css, BuildMode::PRODUCTION).unwrap();
        assert_eq!(paths, vec!["css/a.css", "css/b.css"]);
    }

    #[test]
    fn test_production_bundle_tag() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("css")).unwrap();
        fs::create_dir_all(root.join("min")).unwrap();
        fs::write(root.join("css/a.css"), "a{}").unwrap();

        let mut catalog = AssetCatalog::new(root).unwrap();
        catalog
            .configure(
                AssetKind::Css,
                &crate::config::KindSection {
                    base_path: "css".into(),
                    min_path: Some("min".into()),
                    files: [("a".to_string(), "a.css".to_string())].into(),
                    ..Default::default()
                },
            )
            .unwrap();
        let mut m = AssetManager::new(Arc::new(catalog)).with_minifier(Arc::new(Concat));
        m.add_css("a");

        let tags = m.tags(AssetKind::Css, BuildMode::PRODUCTION, "/").unwrap();
        assert!(tags.starts_with(r#"<link type="text/css" rel="stylesheet" href="/min/"#), "{tags}");
        assert!(tags.ends_with(r#".css" />"#));
        assert_eq!(tags.lines().count(), 1);
    }

    #[test]
    fn test_href_escaping() {
        assert_eq!(render_tag(AssetKind::Js, "/a.js?x=1&y=\"2\""),
            r#"<script type="text/javascript" src="/a.js?x=1&amp;y=&quot;2&quot;"></script>"#);
        assert_eq!(href("", "/x.css"), "/x.css");
        assert_eq!(href("/app/", "x.css"), "/app/x.css");
    }
}
