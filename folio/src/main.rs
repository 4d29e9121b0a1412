use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use folio::commands::{compose, rate_limit::RateLimitCommand, send, validate, FieldArgs};
use folio_models::theme::ThemeContext;
use folio_utils::folio_version;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    let config = folio_config::load().context("Failed to load config")?;
    let theme = ThemeContext::new(cli.dark);

    match cli.command {
        Command::Send { fields } => send::invoke(fields, config, theme).await?,
        Command::Compose => compose::invoke(config, theme).await?,
        Command::Validate { fields } => validate::invoke(fields, config, theme)?,
        Command::RateLimit { command } => command.invoke(config).await?,
        Command::CheckConfig { verbose } => {
            verbose.then(|| println!("{config:#?}"));
        }
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version = folio_version())]
struct Cli {
    /// Use the dark color variant for feedback
    #[arg(long, global = true, env = "FOLIO_DARK_MODE")]
    dark: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send a contact message
    #[command(aliases(["s"]))]
    Send {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Fill in the contact form interactively and send it
    #[command(aliases(["c"]))]
    Compose,
    /// Validate a contact message without sending it
    #[command(aliases(["v"]))]
    Validate {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Inspect or reset the submission rate limit
    #[command(aliases(["rl"]))]
    RateLimit {
        #[command(subcommand)]
        command: RateLimitCommand,
    },
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli() {
        Cli::command().debug_assert();
    }
}
