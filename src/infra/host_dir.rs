use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Makes sure `path` exists as a directory, creating parents as needed.
///
/// Returns `true` when the directory had to be created. Calling it again on an
/// existing directory is a no-op.
pub fn ensure_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        debug!("Diretório {:?} já existe", path);
        return Ok(false);
    }

    info!("  Diretório {:?} não existe. Criando...", path);
    fs::create_dir_all(path).with_context(|| format!("criando {:?}", path))?;

    Ok(true)
}
