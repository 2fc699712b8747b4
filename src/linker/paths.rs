//! Home expansion and lexical path canonicalization.
//!
//! Nothing in this module touches the filesystem. In particular existing
//! symlinks are never resolved, so two different spellings of the same file
//! (one through a symlinked directory) are treated as different paths.
use std::path::{Component, Path, PathBuf};

use crate::error::LinkError;

/// Marker that stands for the invoking user's home directory.
pub const HOME_MARKER: char = '~';

/// Source of the invoking user's home directory.
///
/// Injected into [`PathResolver`] so the lookup happens once per run and can
/// be pinned in tests.
pub trait HomeDirProvider {
    /// Return the home directory, or `None` if it cannot be determined.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Looks up the home directory of the current user via [`dirs::home_dir`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHomeDir;

impl HomeDirProvider for SystemHomeDir {
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

/// A fixed home directory.
#[derive(Debug, Clone)]
pub struct FixedHome(pub PathBuf);

impl HomeDirProvider for FixedHome {
    fn home_dir(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// Turns raw config paths into cleaned absolute paths.
///
/// Relative paths are anchored at the managed root; home-rooted paths at the
/// cached home directory.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    home: Option<PathBuf>,
}

impl PathResolver {
    /// Create a resolver anchored at `root`, querying `provider` once.
    ///
    /// `root` should be absolute; relative roots produce relative results.
    pub fn new(root: impl Into<PathBuf>, provider: &dyn HomeDirProvider) -> Self {
        Self {
            root: clean(&root.into()),
            home: provider.home_dir().map(|home| clean(&home)),
        }
    }

    /// Re-anchor the resolver at a different managed root, keeping the cached
    /// home directory.
    #[must_use]
    pub fn with_root(self, root: impl Into<PathBuf>) -> Self {
        Self {
            root: clean(&root.into()),
            home: self.home,
        }
    }

    /// The managed root relative paths are resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The cached home directory, if one was found.
    #[must_use]
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Substitute the home directory for a leading `~` or `~/`.
    ///
    /// Any other path, including `~user` forms, is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Resolution`] if `path` is home-rooted and the home
    /// directory is unknown.
    pub fn expand_home(&self, path: &str) -> Result<PathBuf, LinkError> {
        let Some(rest) = strip_home_marker(path) else {
            return Ok(PathBuf::from(path));
        };
        let home = self.home.as_ref().ok_or_else(|| LinkError::Resolution {
            path: path.to_string(),
        })?;
        if rest.is_empty() {
            Ok(home.clone())
        } else {
            Ok(home.join(rest))
        }
    }

    /// Make `path` absolute against the managed root and clean it lexically.
    #[must_use]
    pub fn canonicalize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            clean(path)
        } else {
            clean(&self.root.join(path))
        }
    }

    /// Expand and canonicalize a raw config path.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Resolution`] if the home directory is needed but
    /// unknown.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, LinkError> {
        Ok(self.canonicalize(&self.expand_home(raw)?))
    }
}

/// Return the remainder after a leading `~` or `~/`, or `None` if `path` is
/// not home-rooted in that sense.
fn strip_home_marker(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(HOME_MARKER)?;
    if rest.is_empty() {
        return Some(rest);
    }
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if std::path::is_separator(c) => Some(chars.as_str()),
        _ => None,
    }
}

/// `true` if the raw path ends in a separator and therefore names a directory
/// the source should be placed into.
#[must_use]
pub fn is_directory_target(raw: &str) -> bool {
    raw.chars().next_back().is_some_and(std::path::is_separator)
}

/// Lexically clean `path`: drop `.` and empty segments and collapse `..`
/// against the preceding segment. `..` directly under the root is dropped.
#[must_use]
pub fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last().copied() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use mockall::mock;

    mock! {
        Home {}
        impl HomeDirProvider for Home {
            fn home_dir(&self) -> Option<PathBuf>;
        }
    }

    fn resolver() -> PathResolver {
        PathResolver::new("/dots", &FixedHome(PathBuf::from("/home/user")))
    }

    #[test]
    fn expand_home_bare_marker_is_home() {
        assert_eq!(
            resolver().expand_home("~").unwrap(),
            PathBuf::from("/home/user")
        );
    }

    #[test]
    fn expand_home_joins_remainder() {
        assert_eq!(
            resolver().expand_home("~/x").unwrap(),
            PathBuf::from("/home/user/x")
        );
        assert_eq!(
            resolver().expand_home("~/.config/nvim").unwrap(),
            PathBuf::from("/home/user/.config/nvim")
        );
    }

    #[test]
    fn expand_home_leaves_other_paths_alone() {
        assert_eq!(
            resolver().expand_home("/abs/path").unwrap(),
            PathBuf::from("/abs/path")
        );
        assert_eq!(
            resolver().expand_home("relative/x").unwrap(),
            PathBuf::from("relative/x")
        );
        assert_eq!(
            resolver().expand_home("~other").unwrap(),
            PathBuf::from("~other")
        );
    }

    #[test]
    fn expand_home_without_home_is_resolution_error() {
        let mut provider = MockHome::new();
        provider.expect_home_dir().return_const(None::<PathBuf>);
        let resolver = PathResolver::new("/dots", &provider);
        let err = resolver.expand_home("~/x").unwrap_err();
        assert!(matches!(err, LinkError::Resolution { .. }));
        // Non-home paths still resolve.
        assert!(resolver.expand_home("/abs").is_ok());
    }

    #[test]
    fn home_provider_is_queried_once() {
        let mut provider = MockHome::new();
        provider
            .expect_home_dir()
            .times(1)
            .return_const(Some(PathBuf::from("/home/user")));
        let resolver = PathResolver::new("/dots", &provider).with_root("/elsewhere");
        for _ in 0..3 {
            resolver.resolve("~/a").unwrap();
        }
        assert_eq!(resolver.home(), Some(Path::new("/home/user")));
        assert_eq!(resolver.root(), Path::new("/elsewhere"));
    }

    #[test]
    fn canonicalize_anchors_relative_paths_at_root() {
        assert_eq!(
            resolver().canonicalize(Path::new("vimrc")),
            PathBuf::from("/dots/vimrc")
        );
    }

    #[test]
    fn canonicalize_removes_redundant_segments() {
        assert_eq!(
            resolver().canonicalize(Path::new("/a//b/./c/")),
            PathBuf::from("/a/b/c")
        );
        assert_eq!(
            resolver().canonicalize(Path::new("./config/./git")),
            PathBuf::from("/dots/config/git")
        );
    }

    #[test]
    fn canonicalize_collapses_parent_segments_lexically() {
        assert_eq!(
            resolver().canonicalize(Path::new("/a/b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(
            resolver().canonicalize(Path::new("/../../etc")),
            PathBuf::from("/etc")
        );
        assert_eq!(
            resolver().canonicalize(Path::new("../sibling")),
            PathBuf::from("/sibling")
        );
    }

    #[test]
    fn resolve_expands_then_cleans() {
        assert_eq!(
            resolver().resolve("~/.config//nvim/").unwrap(),
            PathBuf::from("/home/user/.config/nvim")
        );
        assert_eq!(
            resolver().resolve("~/").unwrap(),
            PathBuf::from("/home/user")
        );
    }

    #[test]
    fn clean_relative_keeps_leading_parents() {
        assert_eq!(clean(Path::new("../a/./b")), PathBuf::from("../a/b"));
        assert_eq!(clean(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn directory_target_detection() {
        assert!(is_directory_target("~/.config/"));
        assert!(is_directory_target("/"));
        assert!(!is_directory_target("~/.vimrc"));
        assert!(!is_directory_target(""));
    }
}
