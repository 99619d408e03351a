use std::io::ErrorKind;
use std::path::Path;

use crate::error::StorageError;

/// Read a file, mapping "does not exist" to `None`.
pub fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

/// Replace `path` with `contents` via a temp sibling and rename, so readers
/// never see a half-written document.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StorageError::io(path, ErrorKind::InvalidInput.into()))?;
    let tmp_path = path.with_file_name(permanence_core::paths::temp_file(file_name));

    std::fs::write(&tmp_path, contents).map_err(|e| StorageError::io(&tmp_path, e))?;

    // Patient data: owner-only on Unix.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))
            .map_err(|e| StorageError::io(&tmp_path, e))?;
    }

    std::fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e))?;
    Ok(())
}
