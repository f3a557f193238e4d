//! Config path resolution and symlink checks.

use dirs::config_dir;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;

/// Config file location.
///
/// `$BLOCKCHAININCUBATOR_CONFIG` wins (relative values are resolved against
/// the current directory); otherwise the OS config dir, falling back to
/// `$HOME/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        let p = PathBuf::from(p);
        if p.is_absolute() {
            return Some(p);
        }
        return env::current_dir().ok().map(|cwd| cwd.join(p));
    }
    if let Some(mut base) = config_dir() {
        base.push("blockchainincubator");
        base.push("config.xml");
        Some(base)
    } else {
        env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("blockchainincubator")
                .join("config.xml")
        })
    }
}

/// True when the config path came from the environment rather than the default.
pub fn config_path_is_explicit() -> bool {
    env::var_os(CONFIG_ENV).is_some()
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
