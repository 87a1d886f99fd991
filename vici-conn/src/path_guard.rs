use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Refuse to write `output` when it resolves to the `input` file.
pub fn ensure_not_input(output: &Path, input: &Path) -> Result<()> {
    let out = resolve(output)
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;
    let src = resolve(input)
        .with_context(|| format!("failed to resolve input path {}", input.display()))?;
    if out == src {
        bail!(
            "refusing to overwrite config file: output {} matches input {}",
            output.display(),
            input.display()
        );
    }
    Ok(())
}

fn resolve(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }

    // A missing output path cannot be canonicalized; `..` segments stay as written.
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir().context("current_dir")?.join(path))
}
