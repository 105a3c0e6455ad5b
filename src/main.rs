// Entrypoint for the CLI application.
// - Keeps `main` small: resolve config, set up logging, build the
//   repository and hand it to the menu loop.
// - Returns `anyhow::Result` so storage failures print their cause chain.

use bookshelf_cli::config::Config;
use bookshelf_cli::repository::BookRepository;
use bookshelf_cli::storage::JsonFileStorage;
use bookshelf_cli::ui::{main_menu, LineConsole, TerminalConsole};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // Diagnostics go to stderr so they never mix with the menu.
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let repo = BookRepository::new(JsonFileStorage::new(&config.books_path));

    // Prompts need a real terminal; fall back to plain lines for piped input.
    if std::io::stdin().is_terminal() {
        main_menu(&repo, &mut TerminalConsole::new())?;
    } else {
        let stdin = std::io::stdin();
        main_menu(&repo, &mut LineConsole::new(stdin.lock(), std::io::stdout()))?;
    }
    Ok(())
}
