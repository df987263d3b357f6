//! Durable, atomic file replacement.
//!
//! The full line sequence is written to a temporary file in the
//! destination's own directory, flushed and fsynced, then renamed over
//! the destination. Keeping the temporary file next to the destination
//! makes the rename a same-filesystem operation wherever the platform
//! offers atomic rename semantics. Should the rename still fail with the
//! platform's cross-device signal, an explicit copy-and-remove fallback
//! takes over.
//!
//! No locking is performed against other writers of the same
//! destination; the committer assumes it is the only one. This is a
//! known limitation.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Suffix appended to the destination's file name for backups.
pub const BACKUP_SUFFIX: &str = "~sug";

/// Replace `dest` with `lines`, atomically.
///
/// With `backup` set and `dest` existing, the old content is first moved
/// aside to the backup path, clobbering any previous backup. A failed
/// backup rename aborts the commit with the destination untouched. On
/// any failure the destination holds either its original bytes or the
/// complete new content, never a mix.
pub fn commit(dest: &Path, lines: &[String], backup: bool) -> Result<()> {
    let dir = parent_dir(dest);

    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| Error::io(&dir, e))?;
    for line in lines {
        tmp.write_all(line.as_bytes())
            .map_err(|e| Error::io(tmp.path(), e))?;
    }
    tmp.flush().map_err(|e| Error::io(tmp.path(), e))?;
    // Force the bytes to stable storage before any rename makes them
    // visible under the destination's name.
    tmp.as_file()
        .sync_all()
        .map_err(|e| Error::io(tmp.path(), e))?;

    if backup && dest.exists() {
        let bak = backup_path(dest);
        fs::rename(dest, &bak).map_err(|e| Error::io(dest, e))?;
    }

    tracing::debug!(dest = %dest.display(), lines = lines.len(), "committing");

    match tmp.persist(dest) {
        Ok(_) => Ok(()),
        Err(err) if is_cross_device(&err.error) => copy_and_remove(err.file, dest),
        Err(err) => Err(Error::io(dest, err.error)),
    }
}

/// Backup location for `dest`: same directory, name plus suffix.
pub fn backup_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(BACKUP_SUFFIX);
    dest.with_file_name(name)
}

/// Directory the temporary file must be created in.
fn parent_dir(dest: &Path) -> PathBuf {
    match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// The one rename failure with a defined fallback.
fn is_cross_device(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices
}

/// Fallback for a cross-device rename: copy the temporary file's bytes
/// to the destination, force them out, then remove the temporary file.
fn copy_and_remove(tmp: NamedTempFile, dest: &Path) -> Result<()> {
    let tmp_path = tmp.path().to_path_buf();
    let mut src = tmp.reopen().map_err(|e| Error::io(&tmp_path, e))?;
    let mut out = File::create(dest).map_err(|e| Error::io(dest, e))?;
    io::copy(&mut src, &mut out).map_err(|e| Error::io(dest, e))?;
    out.sync_all().map_err(|e| Error::io(dest, e))?;
    tmp.close().map_err(|e| Error::io(&tmp_path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_commit_writes_exact_bytes() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("target.txt");
        fs::write(&dest, "old content\n").unwrap();

        commit(&dest, &lines(&["first\n", "second\n", "no newline"]), false).unwrap();

        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "first\nsecond\nno newline"
        );
    }

    #[test]
    fn test_commit_creates_destination_when_absent() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("fresh.txt");

        commit(&dest, &lines(&["hello\n"]), false).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "hello\n");
    }

    #[test]
    fn test_backup_keeps_previous_content() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("target.txt");
        fs::write(&dest, "original\n").unwrap();

        commit(&dest, &lines(&["replaced\n"]), true).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "replaced\n");
        let bak = dir.path().join("target.txt~sug");
        assert_eq!(fs::read_to_string(&bak).unwrap(), "original\n");
    }

    #[test]
    fn test_backup_clobbers_older_backup() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("target.txt");
        fs::write(&dest, "v2\n").unwrap();
        fs::write(dir.path().join("target.txt~sug"), "v1\n").unwrap();

        commit(&dest, &lines(&["v3\n"]), true).unwrap();

        let bak = dir.path().join("target.txt~sug");
        assert_eq!(fs::read_to_string(&bak).unwrap(), "v2\n");
    }

    #[test]
    fn test_no_backup_without_flag() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("target.txt");
        fs::write(&dest, "original\n").unwrap();

        commit(&dest, &lines(&["replaced\n"]), false).unwrap();

        assert!(!dir.path().join("target.txt~sug").exists());
    }

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/some/dir/notes.txt")),
            PathBuf::from("/some/dir/notes.txt~sug")
        );
        assert_eq!(backup_path(Path::new("plain")), PathBuf::from("plain~sug"));
    }

    #[test]
    fn test_failed_commit_leaves_destination_intact() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("missing-dir").join("target.txt");

        // The temp file cannot be created in a nonexistent directory, so
        // the commit fails before the destination is ever touched.
        let err = commit(&dest, &lines(&["data\n"]), false).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn test_empty_sequence_truncates_destination() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("target.txt");
        fs::write(&dest, "something\n").unwrap();

        commit(&dest, &[], false).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "");
    }
}
