//! Asset minification for JS and CSS bundles.
//!
//! [`AssetMinifier`] is the seam the bundler calls; [`StandardMinifier`]
//! implements it with oxc for JavaScript and lightningcss for CSS.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::utils::path::{is_external_link, parent_dir, resolve_relative};

#[derive(Debug, Error)]
pub enum MinifyError {
    #[error("Asset file `{0}` doesn't exist")]
    InvalidInput(String),

    #[error("IO error when reading `{0}`")]
    Io(String, #[source] io::Error),
}

/// Turns an ordered list of files into one combined, minified bundle.
///
/// `files` are relative to `root` and must be emitted in the given order.
pub trait AssetMinifier: Send + Sync {
    fn minify_css(&self, files: &[&str], root: &Path) -> Result<Vec<u8>, MinifyError>;

    fn minify_js(&self, files: &[&str], root: &Path) -> Result<Vec<u8>, MinifyError>;
}

/// oxc + lightningcss minifier.
///
/// Files named `*.min.css`/`*-min.js` are taken as already minified and
/// copied through. Sources that fail to parse are kept unminified.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardMinifier;

impl StandardMinifier {
    fn read(root: &Path, file: &str) -> Result<String, MinifyError> {
        let path = root.join(file);
        if !path.is_file() {
            return Err(MinifyError::InvalidInput(file.to_string()));
        }
        fs::read_to_string(&path).map_err(|err| MinifyError::Io(file.to_string(), err))
    }
}

impl AssetMinifier for StandardMinifier {
    fn minify_css(&self, files: &[&str], root: &Path) -> Result<Vec<u8>, MinifyError> {
        let mut parts = Vec::with_capacity(files.len());
        for file in files {
            let source = Self::read(root, file)?;
            let css = if is_minified(file) {
                source
            } else {
                minify_css(&source).unwrap_or(source)
            };
            // The bundle lives elsewhere, relative urls must not break
            parts.push(rewrite_css_urls(&css, parent_dir(file)));
        }
        Ok(hoist_imports(&parts.join("\n")).into_bytes())
    }

    fn minify_js(&self, files: &[&str], root: &Path) -> Result<Vec<u8>, MinifyError> {
        let mut parts = Vec::with_capacity(files.len());
        for file in files {
            let source = Self::read(root, file)?;
            if is_minified(file) {
                parts.push(source);
            } else {
                parts.push(minify_js(&source).unwrap_or(source));
            }
        }
        Ok(parts.join("\n").into_bytes())
    }
}

/// Minify JavaScript source code.
pub fn minify_js(source: &str) -> Option<String> {
    let allocator = Allocator::default();
    // Classic scripts: top-level bindings are globals shared across files
    let source_type = SourceType::script();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return None;
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Some(code)
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Option<String> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default()).ok()?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .ok()?;
    Some(result.code)
}

/// `x.min.css`, `x-min.js` and the like.
fn is_minified(file: &str) -> bool {
    let stem = Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    stem.ends_with(".min") || stem.ends_with("-min")
}

static CSS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\([ \t\r\n]*(['"]?)([^'")]*)['"]?[ \t\r\n]*\)"#).unwrap()
});

static CSS_IMPORT_STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"@import([ \t\r\n]*)(['"])([^'"]*)['"]"#).unwrap());

static CSS_IMPORT_RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@import[^;]*;").unwrap());

/// Rewrite relative references to root-absolute URLs from `dir`.
///
/// Absolute paths, fragments and external/data URLs are left alone.
pub fn rewrite_css_urls(css: &str, dir: &str) -> String {
    let rewrite = |url: &str| -> Option<String> {
        let url = url.trim();
        if url.is_empty() || url.starts_with(['/', '#']) || is_external_link(url) {
            return None;
        }
        Some(resolve_relative(dir, url))
    };

    let css = CSS_URL.replace_all(css, |caps: &Captures<'_>| match rewrite(&caps[2]) {
        Some(url) => format!("url({q}{url}{q})", q = &caps[1]),
        None => caps[0].to_string(),
    });

    CSS_IMPORT_STRING
        .replace_all(&css, |caps: &Captures<'_>| match rewrite(&caps[3]) {
            Some(url) => format!("@import{}{q}{url}{q}", &caps[1], q = &caps[2]),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Move every `@import` rule to the top; they are ignored anywhere else.
pub fn hoist_imports(css: &str) -> String {
    let imports: Vec<&str> = CSS_IMPORT_RULE.find_iter(css).map(|m| m.as_str()).collect();
    if imports.is_empty() {
        return css.to_string();
    }
    let mut out = imports.concat();
    out.push_str(&CSS_IMPORT_RULE.replace_all(css, ""));
    out
}
