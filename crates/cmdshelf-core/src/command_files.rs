//! Placement primitives for installed command files.

use anyhow::{Context, Result, bail};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use crate::USER_AGENT;
use crate::paths::{self, Scope};

static COMMAND_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("command name pattern"));

static GITHUB_BLOB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://github\.com/([^/]+)/([^/]+)/blob/(.+)$").expect("github blob pattern")
});

/// Validate a command name for use as a file stem.
pub fn validate_command_name(name: &str) -> Result<()> {
    if COMMAND_NAME_RE.is_match(name) {
        Ok(())
    } else {
        bail!("Invalid command name: \"{name}\"");
    }
}

/// True iff a command file is already installed in the given scope.
pub fn command_exists(name: &str, scope: Scope) -> Result<bool> {
    Ok(paths::command_path(name, scope)?.exists())
}

fn ensure_commands_dir(scope: Scope) -> Result<PathBuf> {
    let dir = paths::commands_dir(scope)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create commands directory: {}", dir.display()))?;
    Ok(dir)
}

/// Copy a registry-local command file into the target scope.
pub fn copy_local_command(source: &Path, name: &str, scope: Scope) -> Result<PathBuf> {
    ensure_commands_dir(scope)?;
    let target = paths::command_path(name, scope)?;
    std::fs::copy(source, &target).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            source.display(),
            target.display()
        )
    })?;
    Ok(target)
}

/// Download a command document into the target scope. GitHub blob URLs
/// are rewritten to their raw content form first.
pub async fn download_command(url: &str, name: &str, scope: Scope) -> Result<PathBuf> {
    ensure_commands_dir(scope)?;
    let target = paths::command_path(name, scope)?;
    let raw_url = github_blob_to_raw(url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_default();
    let response = client
        .get(&raw_url)
        .send()
        .await
        .with_context(|| format!("Failed to download command from {raw_url}"))?;
    if !response.status().is_success() {
        bail!(
            "Failed to download command from {}: {} {}",
            raw_url,
            response.status().as_u16(),
            response.status().canonical_reason().unwrap_or_default()
        );
    }

    let content = response
        .text()
        .await
        .with_context(|| format!("Failed to download command from {raw_url}"))?;
    std::fs::write(&target, content)
        .with_context(|| format!("Failed to write file: {}", target.display()))?;
    Ok(target)
}

/// Remove an installed command file. Removing a file that is not there
/// is not an error.
pub fn remove_command(name: &str, scope: Scope) -> Result<()> {
    let target = paths::command_path(name, scope)?;
    if target.exists() {
        std::fs::remove_file(&target)
            .with_context(|| format!("Failed to remove file: {}", target.display()))?;
    }
    Ok(())
}

/// Rewrite a GitHub blob URL to its raw content counterpart. Any other
/// URL passes through unchanged.
pub fn github_blob_to_raw(url: &str) -> String {
    match GITHUB_BLOB_RE.captures(url) {
        Some(caps) => format!(
            "https://raw.githubusercontent.com/{}/{}/{}",
            &caps[1], &caps[2], &caps[3]
        ),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::env_lock;

    const CMDSHELF_DIR_ENV: &str = "CMDSHELF_DIR";

    #[test]
    fn accepts_reasonable_command_names() {
        for name in ["hist", "git-summary", "v2.check", "a_b"] {
            validate_command_name(name).unwrap();
        }
    }

    #[test]
    fn rejects_path_like_command_names() {
        for name in ["", "../evil", "a b", "a/b", ".hidden"] {
            let error = validate_command_name(name).unwrap_err();
            assert!(error.to_string().contains("Invalid command name"));
        }
    }

    #[test]
    fn rewrites_github_blob_urls() {
        assert_eq!(
            github_blob_to_raw("https://github.com/user/repo/blob/main/commands/x.md"),
            "https://raw.githubusercontent.com/user/repo/main/commands/x.md"
        );
        // Non-blob URLs pass through untouched.
        assert_eq!(
            github_blob_to_raw("https://raw.githubusercontent.com/user/repo/main/x.md"),
            "https://raw.githubusercontent.com/user/repo/main/x.md"
        );
        assert_eq!(
            github_blob_to_raw("https://example.com/x.md"),
            "https://example.com/x.md"
        );
    }

    #[test]
    fn copies_and_removes_user_scope_commands() {
        let _lock = env_lock();
        let temp = tempfile::tempdir().unwrap();
        unsafe { std::env::set_var(CMDSHELF_DIR_ENV, temp.path()) };

        let source = temp.path().join("source.md");
        std::fs::write(&source, "# source").unwrap();

        assert!(!command_exists("hist", Scope::User).unwrap());
        let target = copy_local_command(&source, "hist", Scope::User).unwrap();
        assert_eq!(target, temp.path().join("commands").join("hist.md"));
        assert!(command_exists("hist", Scope::User).unwrap());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "# source");

        remove_command("hist", Scope::User).unwrap();
        assert!(!command_exists("hist", Scope::User).unwrap());
        // Removing again is a no-op.
        remove_command("hist", Scope::User).unwrap();

        unsafe { std::env::remove_var(CMDSHELF_DIR_ENV) };
    }

    #[tokio::test]
    async fn downloads_command_content() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let _lock = env_lock();
        let temp = tempfile::tempdir().unwrap();
        unsafe { std::env::set_var(CMDSHELF_DIR_ENV, temp.path()) };

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/commands/hist/hist.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# history"))
            .mount(&server)
            .await;

        let url = format!("{}/commands/hist/hist.md", server.uri());
        let target = download_command(&url, "hist", Scope::User).await.unwrap();
        assert_eq!(std::fs::read_to_string(target).unwrap(), "# history");

        unsafe { std::env::remove_var(CMDSHELF_DIR_ENV) };
    }

    #[tokio::test]
    async fn download_failure_reports_status() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let _lock = env_lock();
        let temp = tempfile::tempdir().unwrap();
        unsafe { std::env::set_var(CMDSHELF_DIR_ENV, temp.path()) };

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.md"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing.md", server.uri());
        let error = download_command(&url, "hist", Scope::User).await.unwrap_err();
        assert!(error.to_string().contains("404"));
        assert!(!command_exists("hist", Scope::User).unwrap());

        unsafe { std::env::remove_var(CMDSHELF_DIR_ENV) };
    }
}
