use anyhow::{Result, bail};
use colored::Colorize;
use tracing::debug;

use cmdshelf_core::command_files;
use cmdshelf_core::paths::Scope;
use cmdshelf_core::registry::{self, RegistryCommand, RegistryLoader};

use crate::cli::AddArgs;

/// Base URL for registry-hosted command content in production mode.
const REGISTRY_CONTENT_BASE: &str =
    "https://raw.githubusercontent.com/cmdshelf/cmdshelf-registry/main";

pub async fn run(loader: &RegistryLoader, args: AddArgs) -> Result<()> {
    let scope = args.scope.scope();
    let target_name = args.name.as_deref().unwrap_or(&args.command_name);
    command_files::validate_command_name(target_name)?;

    let Some(command) = loader.find_command_async(&args.command_name).await? else {
        bail!("Command \"{}\" not found in registry", args.command_name);
    };
    debug!(
        "resolved \"{}\" as a {} command",
        args.command_name,
        command.type_name()
    );

    if command_files::command_exists(target_name, scope)? {
        bail!(
            "Command \"{target_name}\" already exists in {scope} scope. Remove it first with: cmdshelf remove {target_name}{}",
            if scope == Scope::User { " --user" } else { "" }
        );
    }

    match command {
        RegistryCommand::RegistryEntry { name, .. } => {
            if registry::local_registry_available() {
                let source = registry::registry_command_source(&registry::registry_path(), &name);
                command_files::copy_local_command(&source, target_name, scope)?;
                println!(
                    "Added command \"{}\" from the local registry",
                    target_name.green()
                );
            } else {
                let url = format!("{REGISTRY_CONTENT_BASE}/commands/{name}/{name}.md");
                command_files::download_command(&url, target_name, scope).await?;
                println!(
                    "Added command \"{}\" from the remote registry",
                    target_name.green()
                );
            }
        }
        RegistryCommand::Github { url, .. } => {
            command_files::download_command(&url, target_name, scope).await?;
            println!("Added command \"{}\" from {url}", target_name.green());
        }
    }

    Ok(())
}
