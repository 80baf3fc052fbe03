// src/bin/contacts_console.rs

use std::io::{self, BufRead, Write};

use contact_hub::console::CommandProcessor;
use tracing_subscriber::EnvFilter;

const HELP: &str = "Commands: add <name> <phone> <email> | find <id> | delete <id> | \
update <id> <name> <phone> <email> | list | search <name> | exit";

fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let mut processor = CommandProcessor::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "{}", HELP)?;
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "" => continue,
            "exit" | "quit" => break,
            "help" => writeln!(stdout, "{}", HELP)?,
            input => {
                for output in processor.process(input) {
                    writeln!(stdout, "{}", output)?;
                }
            }
        }
    }

    tracing::debug!("Console closed with {} contacts", processor.store().find_all().len());
    Ok(())
}
