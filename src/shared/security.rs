use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Largest config file that will be read (1 MB)
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Fails if `path` is a symbolic link.
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
/// `operation` names the action for the error message ("write", "read").
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Fails unless `path` exists, is not a symlink, is a regular file and is at
/// most `max_size` bytes.
pub fn validate_regular_file(path: &Path, file_description: &str, max_size: u64) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read {} metadata for {}: {}",
            file_description,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            max_size
        );
    }

    Ok(())
}

/// Rejects values that would change the shape of a URL they are spliced into.
///
/// Callers still percent-encode the value; this catches path traversal and
/// query/fragment injection before encoding hides them.
pub fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
    if component.is_empty() {
        anyhow::bail!("{} is empty", component_type);
    }

    if component.contains('/') || component.contains('\\') {
        anyhow::bail!(
            "Security: {} contains path separators which are not allowed",
            component_type
        );
    }

    if component.contains("..") {
        anyhow::bail!(
            "Security: {} contains '..' which is not allowed",
            component_type
        );
    }

    if component.contains(['#', '?', '@']) {
        anyhow::bail!("Security: {} contains URL-unsafe characters", component_type);
    }

    Ok(())
}
