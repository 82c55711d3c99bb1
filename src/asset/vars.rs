//! Path variables and `{NAME}` placeholder substitution.
//!
//! A path template such as `vendor/angular/locale/angular-locale_{LANG}.js`
//! is expanded against a set of [`PathVars`]. Placeholders are `{NAME}` or
//! `{NAME[format]}`; the format part is accepted and passed to computed
//! variables but ignored for literals.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use rustc_hash::FxHashMap;

use super::AssetManager;

/// `{NAME}` or `{NAME[format]}`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([^}\[]+)(?:\[([^\]]*)\])?\}").expect("placeholder pattern is valid")
});

/// Callback computing a variable from the current request's manager.
///
/// Receives the manager, the variable name and the optional `[format]` part.
pub type ComputeFn = dyn Fn(&AssetManager, &str, Option<&str>) -> String + Send + Sync;

/// Value bound to a path variable.
#[derive(Clone)]
pub enum PathVar {
    Literal(String),
    Computed(Arc<ComputeFn>),
}

impl PathVar {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&AssetManager, &str, Option<&str>) -> String + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }
}

impl fmt::Debug for PathVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<String> for PathVar {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for PathVar {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

/// Variable name → value.
#[derive(Debug, Clone, Default)]
pub struct PathVars {
    vars: FxHashMap<String, PathVar>,
}

impl PathVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PathVar>) -> &mut Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PathVar>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&PathVar> {
        self.vars.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Substitute every placeholder in `template`, left to right.
    ///
    /// Unset variables become the empty string.
    pub fn apply(&self, manager: &AssetManager, template: &str) -> String {
        if !template.contains('{') {
            return template.to_string();
        }

        PLACEHOLDER
            .replace_all(template, |caps: &regex::Captures<'_>| {
                let name = &caps[1];
                let format = caps.get(2).map(|m| m.as_str());
                match self.vars.get(name) {
                    Some(PathVar::Literal(value)) => value.clone(),
                    Some(PathVar::Computed(compute)) => compute(manager, name, format),
                    None => String::new(),
                }
            })
            .into_owned()
    }
}
