//! Atomic replace of an output file.
//! - `write_via_temp` fills a hidden sibling, fsyncs it, then renames it over the target.
//! - On Windows, an existing destination is removed first (rename doesn't overwrite there).
//! - On Unix, best-effort fsync of the destination directory after rename.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::Path;

use super::util;

pub fn try_atomic_move(src: &Path, dst: &Path) -> Result<()> {
    #[cfg(windows)]
    {
        if dst.exists() {
            if let Err(e) = fs::remove_file(dst) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    return Err(e).with_context(|| {
                        format!("remove existing destination before rename: {}", dst.display())
                    });
                }
            }
        }
    }

    fs::rename(src, dst)
        .with_context(|| format!("atomic rename '{}' -> '{}'", src.display(), dst.display()))?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // A failed dir fsync must not turn a completed rename into an error.
        let _ = util::fsync_dir(parent);
    }

    Ok(())
}

/// Create a temp sibling of `dest`, hand it to `fill`, then atomically replace `dest`.
///
/// `dest` is untouched unless `fill` succeeds and the rename goes through; the
/// temp file is removed on every failure path.
pub fn write_via_temp<T, F>(dest: &Path, fill: F) -> Result<T>
where
    F: FnOnce(&mut File) -> Result<T>,
{
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = util::unique_temp_path(dir);

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp)
        .with_context(|| format!("create temporary file '{}'", tmp.display()))?;

    let outcome = fill(&mut file).and_then(|value| {
        // An existing destination keeps its mode across the replace.
        if let Ok(meta) = fs::metadata(dest) {
            if meta.is_file() {
                file.set_permissions(meta.permissions()).with_context(|| {
                    format!("copy permissions of '{}' to temporary file", dest.display())
                })?;
            }
        }
        file.sync_all()
            .with_context(|| format!("fsync temporary file '{}'", tmp.display()))?;
        Ok(value)
    });
    drop(file);

    let value = match outcome {
        Ok(v) => v,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
    };

    if let Err(e) = try_atomic_move(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::io::Write;
    use tempfile::tempdir;

    fn leftovers(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with(".blockchainincubator."))
            .collect()
    }

    #[test]
    fn replaces_existing_destination() {
        let td = tempdir().unwrap();
        let dest = td.path().join("out.bin");
        fs::write(&dest, b"old contents").unwrap();

        let n = write_via_temp(&dest, |f| {
            f.write_all(b"new")?;
            Ok(3usize)
        })
        .unwrap();

        assert_eq!(n, 3);
        assert_eq!(fs::read(&dest).unwrap(), b"new");
        assert!(leftovers(td.path()).is_empty());
    }

    #[test]
    fn failed_fill_leaves_destination_untouched() {
        let td = tempdir().unwrap();
        let dest = td.path().join("out.bin");
        fs::write(&dest, b"keep me").unwrap();

        let err = write_via_temp::<(), _>(&dest, |f| {
            f.write_all(b"partial")?;
            Err(anyhow!("boom"))
        })
        .unwrap_err();

        assert_eq!(err.to_string(), "boom");
        assert_eq!(fs::read(&dest).unwrap(), b"keep me");
        assert!(leftovers(td.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn replace_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let td = tempdir().unwrap();
        let dest = td.path().join("secret.bin");
        fs::write(&dest, b"old").unwrap();
        fs::set_permissions(&dest, fs::Permissions::from_mode(0o600)).unwrap();

        write_via_temp(&dest, |f| Ok(f.write_all(b"new")?)).unwrap();

        let mode = fs::metadata(&dest).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
        assert_eq!(fs::read(&dest).unwrap(), b"new");
    }

    #[test]
    fn missing_parent_fails_before_fill() {
        let td = tempdir().unwrap();
        let dest = td.path().join("nope").join("out.bin");
        let mut called = false;
        let res = write_via_temp(&dest, |_| {
            called = true;
            Ok(())
        });
        assert!(res.is_err());
        assert!(!called);
    }
}
