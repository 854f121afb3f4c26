//! Command-line interface for the user accounts service

pub mod serve;

use clap::{Parser, Subcommand};

/// User accounts service - sign-up, sign-in and account management over HTTP
#[derive(Parser)]
#[command(name = "user-accounts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve(serve::ServeArgs),
}

impl Cli {
    /// The selected command, falling back to `serve` with default arguments
    pub fn command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Serve(serve::ServeArgs::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["user-accounts"]).unwrap();
        let Command::Serve(args) = cli.command();
        assert_eq!(args.port, None);
        assert!(!args.in_memory);
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from(["user-accounts", "serve", "--port", "9000", "--in-memory"])
            .unwrap();
        let Command::Serve(args) = cli.command();
        assert_eq!(args.port, Some(9000));
        assert!(args.in_memory);
    }
}
