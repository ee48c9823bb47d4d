//! Helpers for rendering the repository-relative path id of a directory.

use std::path::{Component, Path};

use anyhow::{Result, anyhow};

/// Return the `/`-separated path of `dir` relative to `root`.
///
/// Both paths must already be absolute and normalized (canonicalized by the
/// caller). `root` itself yields the empty id.
pub fn relative_path_id(root: &Path, dir: &Path) -> Result<String> {
    let rel = dir.strip_prefix(root).map_err(|_| {
        anyhow!(
            "{} is not inside repository root {}",
            dir.display(),
            root.display()
        )
    })?;
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            other => {
                return Err(anyhow!(
                    "unexpected path component {:?} in {}",
                    other.as_os_str(),
                    rel.display()
                ));
            }
        }
    }
    Ok(parts.join("/"))
}

/// Remote state object key for a path id.
pub fn state_key(path_id: &str) -> String {
    if path_id.is_empty() {
        "terraform.tfstate".to_string()
    } else {
        format!("{path_id}/terraform.tfstate")
    }
}
