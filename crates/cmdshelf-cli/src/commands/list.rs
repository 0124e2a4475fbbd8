use anyhow::Result;
use colored::Colorize;

use cmdshelf_core::registry::RegistryLoader;

pub async fn run(loader: &RegistryLoader) -> Result<()> {
    let registry = loader.load_async().await?;

    println!("Available commands:");
    println!();

    for command in &registry.commands {
        println!("  {}", command.name().bold());
        println!("    Description: {}", command.description());
        println!("    Type: {}", command.type_name());
        if let Some(url) = command.url() {
            println!("    URL: {url}");
        }
        println!();
    }

    Ok(())
}
