//! Deterministic session name derivation.
//!
//! Maps directory paths to tmux-safe session names, resolving base-name
//! collisions with a short hash suffix.

use std::collections::HashMap;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Tracks which session names have been claimed by which paths.
///
/// The first path to claim a base name keeps it; any later path with the
/// same base name receives a hash-suffixed variant. Resolution is
/// deterministic and idempotent for the lifetime of the registry: the same
/// path always maps to the same name. Entries are never evicted.
#[derive(Debug, Default)]
pub struct NameRegistry {
    /// Sanitized base name -> the path that first claimed it.
    claimed: HashMap<String, String>,
}

impl NameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            claimed: HashMap::new(),
        }
    }

    /// Derive a collision-free session name for a directory path.
    ///
    /// Uses the directory's base name, sanitized for tmux. If a different
    /// path already claimed that base name, the returned name carries a
    /// suffix of the first 6 hex characters of the path's SHA-256 digest.
    /// Two distinct paths sharing both base name and suffix would still
    /// collide; at realistic registry sizes that case is not handled.
    pub fn resolve(&mut self, dir_path: &Path) -> String {
        let path = dir_path.to_string_lossy();
        let base = sanitize_session_name(&base_name(dir_path));

        if let Some(existing) = self.claimed.get(&base) {
            if existing.as_str() != path {
                return format!("{base}-{}", short_hash(&path));
            }
        } else {
            self.claimed.insert(base.clone(), path.into_owned());
        }

        base
    }

    /// Clear all claimed names (for test isolation).
    pub fn reset(&mut self) {
        self.claimed.clear();
    }
}

/// Final path segment, or empty for degenerate paths like `/` or ``.
fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Replace characters tmux does not allow in session names (`.` and `:`).
fn sanitize_session_name(name: &str) -> String {
    name.replace(['.', ':'], "-")
}

/// First 6 hex characters of the path's SHA-256 digest.
fn short_hash(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..6].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_uses_directory_base_name() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.resolve(Path::new("/home/user/projects/myapp")), "myapp");
    }

    #[test]
    fn resolve_sanitizes_dots_and_colons() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.resolve(Path::new("/home/user/projects/my.app")), "my-app");

        registry.reset();
        assert_eq!(registry.resolve(Path::new("/home/user/projects/my:app")), "my-app");

        registry.reset();
        assert_eq!(
            registry.resolve(Path::new("/home/user/with.multiple.dots")),
            "with-multiple-dots"
        );
    }

    #[test]
    fn resolve_is_idempotent_for_the_same_path() {
        let mut registry = NameRegistry::new();
        let first = registry.resolve(Path::new("/home/user/work/api"));
        let again = registry.resolve(Path::new("/home/user/work/api"));
        assert_eq!(first, again);
    }

    #[test]
    fn colliding_base_names_get_a_hash_suffix() {
        let mut registry = NameRegistry::new();

        let first = registry.resolve(Path::new("/h/work/api"));
        assert_eq!(first, "api");

        let second = registry.resolve(Path::new("/h/personal/api"));
        assert_ne!(second, "api");
        assert!(second.starts_with("api-"));

        // Suffix is exactly 6 lowercase hex characters of the path digest.
        let suffix = second.strip_prefix("api-").unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));

        // Deterministic: resolving the colliding path again yields the same name.
        let second_again = registry.resolve(Path::new("/h/personal/api"));
        assert_eq!(second, second_again);

        // First path keeps the unsuffixed name.
        assert_eq!(registry.resolve(Path::new("/h/work/api")), "api");
    }

    #[test]
    fn suffix_is_stable_across_registries() {
        let mut a = NameRegistry::new();
        let mut b = NameRegistry::new();
        a.resolve(Path::new("/h/work/api"));
        b.resolve(Path::new("/h/work/api"));
        assert_eq!(
            a.resolve(Path::new("/h/personal/api")),
            b.resolve(Path::new("/h/personal/api"))
        );
    }

    #[test]
    fn degenerate_paths_pass_through_with_empty_base() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.resolve(Path::new("/")), "");
        registry.reset();
        assert_eq!(registry.resolve(Path::new("")), "");
    }

    #[test]
    fn reset_releases_claimed_names() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.resolve(Path::new("/h/work/api")), "api");
        registry.reset();
        assert_eq!(registry.resolve(Path::new("/h/personal/api")), "api");
    }
}
