use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dietolog")]
#[command(author, version, about = "Telegram bot that reviews meal photos like a dietitian", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (long polling)
    Run,

    /// Analyze a local image file and print the verdict
    Analyze {
        /// Path to a JPEG / WebP / PNG image
        file: PathBuf,

        /// Optional description, same as a Telegram caption
        #[arg(short, long)]
        caption: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_with_caption() {
        let cli = Cli::try_parse_from(["dietolog", "analyze", "lunch.webp", "--caption", "обед"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Analyze {
                file: PathBuf::from("lunch.webp"),
                caption: Some("обед".to_string()),
            })
        );
    }

    #[test]
    fn test_no_command_defaults_to_none() {
        let cli = Cli::try_parse_from(["dietolog"]).unwrap();
        assert_eq!(cli.command, None);
    }
}
