//! Whole-catalog consistency check.
//!
//! Resolution only ever looks at the aliases a request pulls in, so a broken
//! alias can sit unnoticed until some page asks for it. The check walks
//! every declared alias instead and reports all problems at once.

use std::fmt;

use rustc_hash::FxHashMap;

use super::{AssetKind, AssetManager, AssetRegistry};
use crate::utils::path::strip_leading_slash;

/// One problem found by [`AssetManager::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckIssue {
    /// `alias` depends on `dependency`, which is not declared.
    UnknownDependency {
        kind: AssetKind,
        alias: String,
        dependency: String,
    },
    /// The file of `alias` does not exist at `path`.
    FileMissing {
        kind: AssetKind,
        alias: String,
        path: String,
    },
    /// Dependency cycle, first alias repeated at the end.
    Cycle { kind: AssetKind, aliases: Vec<String> },
}

impl fmt::Display for CheckIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDependency {
                kind,
                alias,
                dependency,
            } => write!(f, "{kind} alias `{alias}` depends on unknown alias `{dependency}`"),
            Self::FileMissing { kind, alias, path } => {
                write!(f, "{kind} alias `{alias}`: file `{path}` doesn't exist")
            }
            Self::Cycle { kind, aliases } => {
                write!(f, "{kind} dependency cycle: {}", aliases.join(" -> "))
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

impl AssetManager {
    /// Check every declared alias of every kind, with this manager's variables.
    ///
    /// Issues come out per kind (CSS, JS, images), aliases in sorted order.
    pub fn check(&self) -> Vec<CheckIssue> {
        let mut issues = Vec::new();
        for kind in AssetKind::BUNDLED {
            if let Some(registry) = self.catalog().registry(kind) {
                self.check_registry(registry, &mut issues);
            }
        }
        self.check_images(&mut issues);
        issues
    }

    fn check_registry(&self, registry: &AssetRegistry, issues: &mut Vec<CheckIssue>) {
        let kind = registry.kind();
        let mut marks = FxHashMap::default();
        let mut stack = Vec::new();

        for alias in registry.aliases() {
            let Some(entry) = registry.get(alias) else {
                continue;
            };

            for dep in &entry.deps {
                if !registry.contains(dep) {
                    issues.push(CheckIssue::UnknownDependency {
                        kind,
                        alias: alias.to_string(),
                        dependency: dep.clone(),
                    });
                }
            }

            if !entry.is_umbrella() {
                let path = self.apply_vars(&format!("{}{}", registry.base_path(), entry.path));
                if !self.catalog().root().join(strip_leading_slash(&path)).is_file() {
                    issues.push(CheckIssue::FileMissing {
                        kind,
                        alias: alias.to_string(),
                        path,
                    });
                }
            }

            find_cycles(registry, alias, &mut marks, &mut stack, issues);
        }
    }

    fn check_images(&self, issues: &mut Vec<CheckIssue>) {
        let images = self.catalog().images();
        for alias in images.aliases() {
            let path = self.resolve_image_path(alias);
            if !self.catalog().root().join(strip_leading_slash(&path)).is_file() {
                issues.push(CheckIssue::FileMissing {
                    kind: AssetKind::Image,
                    alias: alias.to_string(),
                    path,
                });
            }
        }
    }
}

/// Depth-first search reporting every back edge as a cycle.
fn find_cycles<'a>(
    registry: &'a AssetRegistry,
    alias: &'a str,
    marks: &mut FxHashMap<&'a str, Mark>,
    stack: &mut Vec<&'a str>,
    issues: &mut Vec<CheckIssue>,
) {
    if marks.contains_key(alias) {
        return;
    }
    let Some(entry) = registry.get(alias) else {
        return;
    };

    marks.insert(alias, Mark::Visiting);
    stack.push(alias);

    for dep in &entry.deps {
        match marks.get(dep.as_str()) {
            Some(Mark::Visiting) => {
                let start = stack.iter().position(|a| *a == dep.as_str()).unwrap_or(0);
                let mut aliases: Vec<String> = stack[start..].iter().map(|a| a.to_string()).collect();
                aliases.push(dep.clone());
                issues.push(CheckIssue::Cycle {
                    kind: registry.kind(),
                    aliases,
                });
            }
            Some(Mark::Done) => {}
            None => find_cycles(registry, dep, marks, stack, issues),
        }
    }

    stack.pop();
    marks.insert(alias, Mark::Done);
}
