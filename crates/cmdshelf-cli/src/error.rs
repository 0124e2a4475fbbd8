use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err);

    let msg = err.to_string().to_lowercase();

    if msg.contains("not found in registry") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  List available commands with:");
        eprintln!("  {} cmdshelf list", "$".dimmed());
    }

    if msg.contains("already exists") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Remove the installed command first with:");
        eprintln!("  {} cmdshelf remove <command-name>", "$".dimmed());
    }

    if msg.contains("failed to fetch") || msg.contains("failed to download") || msg.contains("network") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check your internet connection and try again.");
    }

    std::process::exit(1);
}
