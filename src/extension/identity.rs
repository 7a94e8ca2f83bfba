//! Extension identity resolution
//!
//! Derives the canonical dotted qualified name of an extension from its
//! filesystem path relative to the scan root. Identity is a pure function of
//! the path: the same tree always resolves to the same names, and distinct
//! paths resolve to distinct names. Candidates with a private marker (a
//! leading underscore on any path segment) are skipped.

use std::path::{Path, PathBuf};

/// Library suffixes recognized as extension candidates. The set is fixed so
/// discovery output is identical across platforms.
pub const LIBRARY_SUFFIXES: [&str; 3] = ["so", "dylib", "dll"];

/// Conventional library filename prefix stripped during normalization.
const LIBRARY_PREFIX: &str = "lib";

/// A resolved extension identity: the qualified name plus the path it was
/// derived from. Computed once per candidate per discovery pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionIdentity {
    qualified_name: String,
    path: PathBuf,
}

impl ExtensionIdentity {
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// The final segment of the qualified name.
    pub fn unqualified_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Derives qualified names for candidate files beneath a scan root.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    root: PathBuf,
    namespace: String,
}

impl IdentityResolver {
    pub fn new(root: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            namespace: namespace.into(),
        }
    }

    /// Whether a path carries a recognized library suffix.
    pub fn is_candidate(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| LIBRARY_SUFFIXES.contains(&ext))
            .unwrap_or(false)
    }

    /// Resolve a candidate path to its qualified name.
    ///
    /// Returns `None` when the path is not a candidate, normalizes to an
    /// invalid name, or is marked private. Suffix stripping splits on the
    /// final extension only, so a name like `a.so.bak` is simply not a
    /// candidate rather than being mis-normalized.
    pub fn resolve(&self, path: &Path) -> Option<ExtensionIdentity> {
        if !Self::is_candidate(path) {
            return None;
        }
        let relative = path.strip_prefix(&self.root).ok()?;

        let mut segments: Vec<&str> = Vec::new();
        if let Some(parent) = relative.parent() {
            for component in parent.components() {
                segments.push(component.as_os_str().to_str()?);
            }
        }

        let stem = relative.file_stem()?.to_str()?;
        let basename = stem.strip_prefix(LIBRARY_PREFIX).filter(|s| !s.is_empty());
        segments.push(basename.unwrap_or(stem));

        for segment in &segments {
            if !Self::valid_segment(segment) {
                log::trace!(
                    "path {} does not normalize to a valid name; skipping",
                    path.display()
                );
                return None;
            }
            if segment.starts_with('_') {
                log::trace!("skipping private extension path {}", path.display());
                return None;
            }
        }

        let mut qualified_name = String::new();
        if !self.namespace.is_empty() {
            qualified_name.push_str(&self.namespace);
            qualified_name.push('.');
        }
        qualified_name.push_str(&segments.join("."));

        Some(ExtensionIdentity {
            qualified_name,
            path: path.to_path_buf(),
        })
    }

    // A segment containing the separator would collapse distinct paths onto
    // the same qualified name.
    fn valid_segment(segment: &str) -> bool {
        !segment.is_empty() && !segment.contains('.')
    }
}
