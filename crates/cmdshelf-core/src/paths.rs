use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;

const CMDSHELF_DIR: &str = ".cmdshelf";
const COMMANDS_DIR: &str = "commands";

/// Environment variable to override the user-scope cmdshelf directory.
const CMDSHELF_DIR_ENV: &str = "CMDSHELF_DIR";

/// Where an installed command file lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `./.cmdshelf/commands/` relative to the working directory.
    Project,
    /// `~/.cmdshelf/commands/`.
    User,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scope::Project => "project",
            Scope::User => "user",
        })
    }
}

/// Resolve the user-scope cmdshelf directory.
/// Priority: CMDSHELF_DIR env var > ~/.cmdshelf/
pub fn user_cmdshelf_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CMDSHELF_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(CMDSHELF_DIR))
        .context("Failed to determine home directory")
}

/// Commands directory for the given scope.
pub fn commands_dir(scope: Scope) -> Result<PathBuf> {
    match scope {
        Scope::Project => {
            let cwd = std::env::current_dir().context("Failed to determine working directory")?;
            Ok(cwd.join(CMDSHELF_DIR).join(COMMANDS_DIR))
        }
        Scope::User => Ok(user_cmdshelf_dir()?.join(COMMANDS_DIR)),
    }
}

/// Target file path for an installed command.
pub fn command_path(name: &str, scope: Scope) -> Result<PathBuf> {
    Ok(commands_dir(scope)?.join(format!("{name}.md")))
}
