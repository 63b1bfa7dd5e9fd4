use clap::Parser;
use passvault::cli::{Cli, Commands};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Register { ref handle } => {
            passvault::cli::commands::register::execute(&cli, handle)
        }
        Commands::Add {
            ref label,
            ref username,
            ref secret,
        } => passvault::cli::commands::add::execute(&cli, label, username, secret.as_deref()),
        Commands::List { json } => passvault::cli::commands::list::execute(&cli, json),
        Commands::Show { ref entry_id } => passvault::cli::commands::show::execute(&cli, entry_id),
        Commands::Delete { ref entry_id, force } => {
            passvault::cli::commands::delete::execute(&cli, entry_id, force)
        }
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
