use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use cmdshelf_core::paths::Scope;

#[derive(Parser)]
#[command(name = "cmdshelf")]
#[command(version, about = "cmdshelf - manage markdown snippet commands from a registry")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Add a command from the registry to a local commands directory
    Add(AddArgs),

    /// Remove an installed command
    Remove(RemoveArgs),

    /// List all commands available in the registry
    List,
}

#[derive(Args)]
pub struct AddArgs {
    /// Name of the registry command to add
    pub command_name: String,

    /// Override the command name when adding
    #[arg(short = 'n', long = "name")]
    pub name: Option<String>,

    #[command(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Name of the command to remove
    pub command_name: String,

    #[command(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Args)]
pub struct ScopeArgs {
    /// Use the project .cmdshelf/commands directory (default)
    #[arg(short = 'P', long, conflicts_with = "user")]
    pub project: bool,

    /// Use the user ~/.cmdshelf/commands directory
    #[arg(short = 'U', long)]
    pub user: bool,
}

impl ScopeArgs {
    pub fn scope(&self) -> Scope {
        if self.user { Scope::User } else { Scope::Project }
    }
}
