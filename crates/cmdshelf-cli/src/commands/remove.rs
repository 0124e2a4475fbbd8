use anyhow::{Result, bail};

use cmdshelf_core::command_files;

use crate::cli::RemoveArgs;

pub fn run(args: RemoveArgs) -> Result<()> {
    let scope = args.scope.scope();

    if !command_files::command_exists(&args.command_name, scope)? {
        bail!(
            "Command \"{}\" not found in {scope} scope",
            args.command_name
        );
    }

    command_files::remove_command(&args.command_name, scope)?;
    println!("Removed command \"{}\"", args.command_name);
    Ok(())
}
