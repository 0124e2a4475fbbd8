//! Local registry discovery.
//!
//! A registry file on disk switches the loader into development mode;
//! without one, the loader fetches the production document instead. The
//! predicate reflects live filesystem state and is re-evaluated on every
//! call.

use std::path::{Path, PathBuf};

const REGISTRY_DIR: &str = ".registry";
const REGISTRY_FILE: &str = "registry.yml";

/// Environment variable pointing directly at a registry file. Checked
/// before the working-directory and install-relative candidates.
pub const REGISTRY_PATH_ENV: &str = "CMDSHELF_REGISTRY";

fn env_candidate() -> Option<PathBuf> {
    match std::env::var(REGISTRY_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
        _ => None,
    }
}

fn cwd_candidate() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(REGISTRY_DIR)
        .join(REGISTRY_FILE)
}

fn install_candidate() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join("registry").join(REGISTRY_FILE))
}

fn candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(path) = env_candidate() {
        candidates.push(path);
    }
    candidates.push(cwd_candidate());
    if let Some(path) = install_candidate() {
        candidates.push(path);
    }
    candidates
}

/// Canonical local registry path: the first candidate that exists, or
/// the default guess when none does (existence is re-checked at load
/// time).
pub fn registry_path() -> PathBuf {
    if let Some(path) = candidates().into_iter().find(|path| path.exists()) {
        return path;
    }
    env_candidate().unwrap_or_else(cwd_candidate)
}

/// True iff a local registry file exists right now. This is the sole
/// switch between development and production mode.
pub fn local_registry_available() -> bool {
    candidates().into_iter().any(|path| path.exists())
}

/// Source path for registry-hosted command content next to a local
/// registry file: `<registry dir>/commands/<name>/<name>.md`.
pub fn registry_command_source(registry_path: &Path, name: &str) -> PathBuf {
    registry_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("commands")
        .join(name)
        .join(format!("{name}.md"))
}
