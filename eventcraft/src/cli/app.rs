use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "eventcraft",
    version,
    about = "Eventcraft - plan and promote school events from a short description",
    long_about = "Eventcraft reads a free-text event description and produces a requirement summary, an event plan, a main visual and promotional copy, using OpenAI-compatible text and image services."
)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pipeline once (the default)
    #[command(about = "Plan an event and write all artifacts")]
    Run(RunArgs),

    /// Print an example configuration file
    #[command(name = "example-config", about = "Print an example configuration file")]
    ExampleConfig,
}

#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Directory the artifacts are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Event description; prompted for when omitted
    #[arg(short, long)]
    pub input: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run_args() {
        let cli = Cli::try_parse_from(["eventcraft"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.run.output_dir, PathBuf::from("."));
        assert!(cli.run.input.is_none());
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::try_parse_from(["eventcraft", "-vv", "-o", "out", "-i", "迎新晚会"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.run.output_dir, PathBuf::from("out"));
        assert_eq!(cli.run.input.as_deref(), Some("迎新晚会"));
    }

    #[test]
    fn test_subcommands() {
        let cli = Cli::try_parse_from(["eventcraft", "-c", "eventcraft.toml", "example-config"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::ExampleConfig)));
        assert_eq!(cli.config, Some(PathBuf::from("eventcraft.toml")));

        let cli = Cli::try_parse_from(["eventcraft", "run", "--input", "讲座"]).unwrap();
        match cli.command {
            Some(Commands::Run(args)) => assert_eq!(args.input.as_deref(), Some("讲座")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
