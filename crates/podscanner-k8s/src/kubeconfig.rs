//! Kubeconfig path resolution

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::ClusterError;

/// Used when neither a flag nor `KUBECONFIG` names a file
pub const DEFAULT_KUBECONFIG: &str = "~/.kube/config";

/// Resolve the kubeconfig file to load
///
/// Precedence: explicit path, then the first entry of `KUBECONFIG`, then
/// `~/.kube/config`. A leading `~/` is expanded and the file must be readable.
pub fn resolve_kubeconfig_path(explicit: Option<&str>) -> Result<PathBuf, ClusterError> {
    let path = resolve_from(
        explicit,
        std::env::var_os("KUBECONFIG"),
        dirs::home_dir().as_deref(),
    )?;
    check_readable(&path)?;
    Ok(path)
}

/// Pick the kubeconfig path without touching the filesystem
///
/// `env` is the raw `KUBECONFIG` value; its first non-empty entry is used.
pub(crate) fn resolve_from(
    explicit: Option<&str>,
    env: Option<OsString>,
    home: Option<&Path>,
) -> Result<PathBuf, ClusterError> {
    let from_env = env.and_then(|paths| {
        std::env::split_paths(&paths).find(|p| !p.as_os_str().is_empty())
    });

    let candidate = match (explicit, from_env) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(path)) => path,
        (None, None) => PathBuf::from(DEFAULT_KUBECONFIG),
    };

    expand_home(&candidate, home)
}

/// Replace a leading `~/` with the given home directory
pub(crate) fn expand_home(path: &Path, home: Option<&Path>) -> Result<PathBuf, ClusterError> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = home.ok_or(ClusterError::NoHomeDir)?;
            Ok(home.join(rest))
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}

fn check_readable(path: &Path) -> Result<(), ClusterError> {
    std::fs::File::open(path)
        .map(|_| ())
        .map_err(|source| ClusterError::Config {
            path: path.to_path_buf(),
            source,
        })
}
