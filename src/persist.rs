//! Load, save and append tables as BSV files
//!
//! These are thin wrappers: the codec does the work, the filesystem errors
//! come back unchanged.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::codec::{decode, encode, ROW_SEPARATOR};
use crate::error::PersistError;
use crate::model::Table;

/// Mode used for newly created files when the caller has no preference
pub const DEFAULT_PERMISSIONS: u32 = 0o644;

fn open_options(permissions: u32) -> OpenOptions {
    let mut options = OpenOptions::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(permissions);
    }
    #[cfg(not(unix))]
    let _ = permissions;
    options
}

/// Encode `table` and write it to `path`, creating or truncating the file
pub fn save(table: &Table, path: &Path, permissions: u32) -> Result<(), PersistError> {
    let bytes = encode(table)?;
    write_encoded(&bytes, path, permissions)?;
    debug!(path = %path.display(), rows = table.row_count(), "saved BSV");
    Ok(())
}

/// Write an already encoded buffer to `path`, creating or truncating the file
pub fn write_encoded(bytes: &[u8], path: &Path, permissions: u32) -> Result<(), PersistError> {
    let mut file = open_options(permissions)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote BSV bytes");
    Ok(())
}

/// Read the whole file at `path` and decode it
pub fn load(path: &Path) -> Result<Table, PersistError> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    let table = decode(&bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), rows = table.row_count(), "loaded BSV");
    Ok(table)
}

/// Append `table` to the file at `path` as new rows.
///
/// A missing file is created exclusively and receives `encode(table)` as is.
/// An existing file gets a row separator followed by `encode(table)`, so the
/// first appended row never merges into the file's last row.
///
/// The existence check and the create/open are two separate filesystem
/// calls. Two processes appending to the same path at once may interleave
/// their writes, or one may fail with `AlreadyExists`.
pub fn append(table: &Table, path: &Path, permissions: u32) -> Result<(), PersistError> {
    let bytes = encode(table)?;
    let (mut file, existed) = match OpenOptions::new().append(true).open(path) {
        Ok(file) => (file, true),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let file = open_options(permissions)
                .write(true)
                .create_new(true)
                .open(path)?;
            (file, false)
        }
        Err(e) => return Err(e.into()),
    };
    if existed {
        let mut framed = Vec::with_capacity(bytes.len() + 1);
        framed.push(ROW_SEPARATOR);
        framed.extend_from_slice(&bytes);
        file.write_all(&framed)?;
    } else {
        file.write_all(&bytes)?;
    }
    debug!(path = %path.display(), existed, rows = table.row_count(), "appended BSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;

    fn abc() -> Table {
        Table::from(vec![vec![Cell::text("ABC")]])
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.bsv");
        let table = Table::from(vec![
            vec![Cell::text("A"), Cell::text("B"), Cell::Null],
            vec![Cell::text("C"), Cell::text("")],
            vec![Cell::text("🌎")],
        ]);
        save(&table, &path, DEFAULT_PERMISSIONS).unwrap();
        assert_eq!(load(&path).unwrap(), table);
    }

    #[test]
    fn test_save_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.bsv");
        std::fs::write(&path, b"a much longer previous content").unwrap();
        save(&abc(), &path, DEFAULT_PERMISSIONS).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"ABC".to_vec());
    }

    #[test]
    fn test_append_creates_without_separator() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.bsv");
        append(&abc(), &path, DEFAULT_PERMISSIONS).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), encode(&abc()).unwrap());
    }

    #[test]
    fn test_append_to_existing_adds_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.bsv");
        save(&Table::from(vec![vec![Cell::text("X")]]), &path, DEFAULT_PERMISSIONS).unwrap();
        append(&abc(), &path, DEFAULT_PERMISSIONS).unwrap();
        assert_eq!(
            load(&path).unwrap(),
            Table::from(vec![vec![Cell::text("X")], vec![Cell::text("ABC")]])
        );
    }

    #[test]
    fn test_append_empty_table_then_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e.bsv");
        append(&Table::new(), &path, DEFAULT_PERMISSIONS).unwrap();
        assert_eq!(load(&path).unwrap(), Table::from(vec![Vec::<Cell>::new()]));
        append(&Table::from(vec![vec![Cell::text("def")]]), &path, DEFAULT_PERMISSIONS).unwrap();
        assert_eq!(
            load(&path).unwrap(),
            Table::from(vec![vec![], vec![Cell::text("def")]])
        );
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("missing.bsv")).unwrap_err();
        assert_eq!(err.io_kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_load_propagates_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.bsv");
        std::fs::write(&path, [0xFEu8, 0xFE]).unwrap();
        assert!(matches!(load(&path), Err(PersistError::Decode(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_permissions_apply_on_create() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.bsv");
        append(&abc(), &path, 0o600).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
