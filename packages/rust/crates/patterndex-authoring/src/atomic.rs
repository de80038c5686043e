use std::io::Write;
use std::path::Path;

use crate::error::{AuthoringError, AuthoringResult};

/// Write `content` to `path` through a temp file in the same directory,
/// fsync, then rename, so readers see either the old file or the new one.
pub(crate) fn atomic_write_text(path: &Path, content: &str) -> AuthoringResult<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(|error| AuthoringError::io(parent, error))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("pattern.md");
    // Hidden and not `.md`, so a concurrent scan never picks it up.
    let temp_path = parent.join(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()));

    let write = || -> std::io::Result<()> {
        let mut temp_file = std::fs::File::create(&temp_path)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.sync_all()?;
        Ok(())
    };
    if let Err(error) = write() {
        let _ = std::fs::remove_file(&temp_path);
        return Err(AuthoringError::io(&temp_path, error));
    }

    if let Err(error) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(AuthoringError::io(path, error));
    }
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file atomically");
    Ok(())
}
