//! Extension Discovery Driver
//!
//! Walks the configured root for extension libraries and composes identity
//! resolution, isolated loading, contract validation, and the activation
//! decision into a single lazy traversal. Each candidate is fully resolved
//! before the next is visited; a failure at any stage affects that candidate
//! only. The walk is deterministic: entries are visited depth-first in
//! lexicographic order, so repeated runs over an unchanged tree produce
//! identical output.
//!
//! The only errors that propagate from `discover` are root-level
//! configuration failures, reported before any candidate is visited.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::version::get_extension_api_version;
use crate::extension::activation;
use crate::extension::error::{ExtensionError, ExtensionResult};
use crate::extension::identity::IdentityResolver;
use crate::extension::loader::{ExtensionLoader, NativeLoader};
use crate::extension::metadata::ExtensionMetadata;
use crate::extension::modes::RunMode;
use crate::extension::types::DiscoveredExtension;

/// Discovery over one extension root. Construction fixes the root, the
/// identity namespace, and the active mode; `discover` may be called any
/// number of times and re-walks the filesystem each time.
pub struct ExtensionDiscovery {
    root: PathBuf,
    active_mode: RunMode,
    resolver: IdentityResolver,
    excluded: Vec<String>,
    loader: Box<dyn ExtensionLoader>,
    host_api_version: u32,
}

impl ExtensionDiscovery {
    /// Discovery over `root` with the platform-native loader.
    pub fn new(root: impl Into<PathBuf>, namespace: &str, active_mode: RunMode) -> Self {
        let root = root.into();
        Self {
            resolver: IdentityResolver::new(root.clone(), namespace),
            root,
            active_mode,
            excluded: Vec::new(),
            loader: Box::new(NativeLoader::new()),
            host_api_version: get_extension_api_version(),
        }
    }

    /// Substitute the loading mechanism behind the `ExtensionLoader` seam.
    pub fn with_loader(mut self, loader: Box<dyn ExtensionLoader>) -> Self {
        self.loader = loader;
        self
    }

    /// Extension names (final name segment) to exclude from discovery.
    pub fn with_exclusions<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded = excludes.into_iter().map(Into::into).collect();
        self
    }

    /// Override the API version candidates are checked against.
    pub fn with_api_version(mut self, host_api_version: u32) -> Self {
        self.host_api_version = host_api_version;
        self
    }

    /// Start a lazy traversal of the root.
    ///
    /// Validates the root up front; a missing or unreadable root is the only
    /// error this returns. The iterator processes one candidate per pull and
    /// may be dropped early without leaking directory handles.
    pub fn discover(&self) -> ExtensionResult<DiscoveryIter<'_>> {
        if !self.root.exists() {
            return Err(ExtensionError::RootNotFound {
                path: self.root.clone(),
            });
        }
        let first = sorted_entries(&self.root).map_err(|e| ExtensionError::RootNotReadable {
            path: self.root.clone(),
            cause: e.to_string(),
        })?;

        Ok(DiscoveryIter {
            discovery: self,
            frames: vec![first],
        })
    }

    /// Run one candidate through the identity, loading, contract, and
    /// activation stages. `None` means the candidate produced no result;
    /// the reason has already been logged at the appropriate severity.
    fn process_candidate(&self, path: &Path) -> Option<DiscoveredExtension> {
        let identity = self.resolver.resolve(path)?;

        if self
            .excluded
            .iter()
            .any(|name| name.as_str() == identity.unqualified_name())
        {
            log::debug!(
                "extension '{}' is excluded by configuration",
                identity.qualified_name()
            );
            return None;
        }

        let unit = match self.loader.load(&identity) {
            Ok(unit) => unit,
            Err(err) => {
                // Extensions are independently authored and may not load at
                // all; the unit is reported as not installed and the scan
                // continues with the next candidate.
                log::error!("{} ({})", err, path.display());
                return None;
            }
        };

        if !unit.has_entry_point() {
            log::trace!(
                "'{}' does not expose a setup entry point; skipping",
                identity.qualified_name()
            );
            return None;
        }

        let metadata = match unit.metadata() {
            Some(metadata) => metadata,
            None => {
                log::info!(
                    "extension '{}' declares no metadata; assuming production defaults",
                    identity.qualified_name()
                );
                ExtensionMetadata::assumed(self.host_api_version)
            }
        };

        if !metadata.is_compatible_with(self.host_api_version) {
            let err = ExtensionError::VersionIncompatible {
                name: identity.qualified_name().to_string(),
                extension_api: metadata.api_version,
                host_api: self.host_api_version,
            };
            log::error!("{err}");
            return None;
        }

        let activation = activation::decide(metadata.load_if_mode, self.active_mode);
        log::trace!(
            "load extension '{}'? {}",
            identity.qualified_name(),
            activation.eligible
        );

        Some(DiscoveredExtension {
            identity,
            eligible: activation.eligible,
            eligible_modes: activation.eligible_modes,
            unit,
        })
    }
}

/// Lazy, pull-based traversal produced by [`ExtensionDiscovery::discover`].
pub struct DiscoveryIter<'a> {
    discovery: &'a ExtensionDiscovery,
    frames: Vec<std::vec::IntoIter<PathBuf>>,
}

impl DiscoveryIter<'_> {
    /// Next file in depth-first lexicographic order. Directories are read,
    /// sorted, and released eagerly, so no handle stays open between pulls.
    fn next_file(&mut self) -> Option<PathBuf> {
        loop {
            let frame = self.frames.last_mut()?;
            match frame.next() {
                None => {
                    self.frames.pop();
                }
                Some(path) if path.is_dir() => {
                    if is_private_dir(&path) {
                        log::trace!("skipping private directory {}", path.display());
                        continue;
                    }
                    match sorted_entries(&path) {
                        Ok(frame) => self.frames.push(frame),
                        Err(e) => {
                            log::warn!("skipping unreadable directory {}: {e}", path.display());
                        }
                    }
                }
                Some(path) => return Some(path),
            }
        }
    }
}

impl Iterator for DiscoveryIter<'_> {
    type Item = DiscoveredExtension;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(path) = self.next_file() {
            if let Some(result) = self.discovery.process_candidate(&path) {
                return Some(result);
            }
        }
        None
    }
}

fn sorted_entries(dir: &Path) -> io::Result<std::vec::IntoIter<PathBuf>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    entries.sort();
    Ok(entries.into_iter())
}

// Pruning here saves walking subtrees the identity resolver would reject
// candidate by candidate.
fn is_private_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('_'))
        .unwrap_or(false)
}
