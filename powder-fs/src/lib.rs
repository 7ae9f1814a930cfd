//! Filesystem helpers for the resort table and the snow cache, built on
//! `cap-std` and `camino`.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Read};
use std::path::Component;
use std::time::SystemTime;

/// Open a UTF-8 file path using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read a whole file into a string.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut contents = String::new();
    open_utf8_file(path)?.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Open the directory containing `path` and return it with the file name.
pub fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("'{path}' does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Return whether `path` exists and is a regular file.
///
/// A missing file or missing parent directory reports `false`.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = match open_parent_dir(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Return the last modification time of a file.
pub fn modified_at(path: &Utf8Path) -> io::Result<SystemTime> {
    let (dir, name) = open_parent_dir(path)?;
    let modified = dir.metadata(name.as_str())?.modified()?;
    Ok(modified.into_std())
}

/// Create every missing directory above `path`.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (base, relative) = split_at_root(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// Replace the contents of `path` without exposing a half-written file.
///
/// The bytes are written to a sibling temporary file which is then renamed
/// over the target. Missing parent directories are created first.
pub fn write_atomic(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent_dir(path)?;
    let staging = format!(".{name}.tmp");
    dir.write(staging.as_str(), contents)?;
    if let Err(err) = dir.rename(staging.as_str(), &dir, name.as_str()) {
        let _ = dir.remove_file(staging.as_str());
        return Err(err);
    }
    Ok(())
}

/// Split a directory path into an ambient base directory and the relative
/// remainder below it.
///
/// Absolute paths are opened at their root (or Windows prefix); relative
/// paths at the current directory.
fn split_at_root(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_path = path.as_std_path();
    let base = match std_path.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(prefix).join(std::path::MAIN_SEPARATOR.to_string())
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string()),
        _ => Utf8PathBuf::from("."),
    };
    let relative = if base.as_str() == "." {
        path.to_path_buf()
    } else {
        path.strip_prefix(&base)
            .map_err(|_| io::Error::other(format!("cannot strip '{base}' from '{path}'")))?
            .to_path_buf()
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    Ok((dir, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn utf8(dir: &TempDir, relative: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join(relative)).expect("utf-8 temp path")
    }

    #[rstest]
    fn atomic_write_creates_parents_and_replaces(temp_dir: TempDir) {
        let path = utf8(&temp_dir, "nested/deeper/cache.json");
        write_atomic(&path, b"first").expect("first write");
        write_atomic(&path, b"second").expect("second write");
        assert_eq!(read_to_string(&path).expect("read back"), "second");
        assert!(!file_is_file(&utf8(&temp_dir, "nested/deeper/.cache.json.tmp")).expect("probe"));
    }

    #[rstest]
    fn missing_files_are_not_files(temp_dir: TempDir) {
        assert!(!file_is_file(&utf8(&temp_dir, "absent.json")).expect("probe"));
        assert!(!file_is_file(&utf8(&temp_dir, "absent/dir/file.json")).expect("probe"));
    }

    #[rstest]
    fn directories_are_not_files(temp_dir: TempDir) {
        let path = utf8(&temp_dir, "folder/marker");
        ensure_parent_dir(&path).expect("create folder");
        assert!(!file_is_file(&utf8(&temp_dir, "folder")).expect("probe"));
    }

    #[rstest]
    fn reports_modification_time(temp_dir: TempDir) {
        let path = utf8(&temp_dir, "stamp.txt");
        write_atomic(&path, b"x").expect("write");
        let modified = modified_at(&path).expect("modified time");
        assert!(modified <= SystemTime::now());
    }
}
