use anyhow::Result;
use clap::Parser;
use termkit_core::errors::TermkitError;
use termkit_core::Terminal;

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    let parsed = cli::Cli::parse();

    match parsed.dispatch().await {
        Ok(()) => Ok(()),
        Err(err) => {
            // The command already reported its own outcome; only the status is left
            if let Some(quiet) = err.downcast_ref::<cli::QuietExit>() {
                std::process::exit(quiet.0);
            }

            let message = match err.downcast_ref::<TermkitError>() {
                Some(termkit_error) => termkit_error.to_string(),
                None => format!("{:#}", err),
            };
            tracing::error!("{}", message);
            Terminal::new().exit(Some(&message))
        }
    }
}
