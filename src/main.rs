use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use phishbot::{Config, Dispatcher, PhishinClient, PhishnetClient, Reply, run_bot};

#[derive(Parser)]
#[command(name = "phishbot")]
#[command(about = "Discord bot for Phish setlists, song stats and tour dates")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and answer commands
    Run,

    /// Answer a single command in the terminal, e.g. `ask .setlist 8/31/21`
    Ask {
        /// The chat message to answer
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Show setup guide
    Setup,
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    match cli.command {
        Commands::Run => {
            run().await?;
        }
        Commands::Ask { message } => {
            ask(&message.join(" ")).await?;
        }
        Commands::Setup => {
            show_setup_guide();
        }
    }

    Ok(())
}

fn load_config(missing: impl Fn(&Config) -> Vec<String>) -> Result<Config> {
    let config = Config::from_env().context("Failed to load configuration")?;

    let missing = missing(&config);
    if !missing.is_empty() {
        println!("{}", "Missing configuration:".red());
        for item in &missing {
            println!("   - {}", item);
        }
        println!(
            "\n{}",
            "Please copy .env.example to .env and fill in your tokens.".yellow()
        );
        std::process::exit(1);
    }

    Ok(config)
}

async fn run() -> Result<()> {
    println!("{}", "phishbot".cyan().bold());
    println!("{}", "=".repeat(50));

    let config = load_config(Config::missing_for_bot)?;

    run_bot(&config).await.context("Discord client stopped")?;

    println!("\n{}", "Bot stopped".yellow());
    Ok(())
}

async fn ask(message: &str) -> Result<()> {
    let config = load_config(Config::missing_for_queries)?;

    let phishin = PhishinClient::new(&config.phishin_token, config.request_timeout)
        .context("Failed to build phish.in client")?;
    let phishnet = PhishnetClient::new(&config.phishnet_token, config.request_timeout)
        .context("Failed to build phish.net client")?;
    let dispatcher = Dispatcher::new(phishin, phishnet, &config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Invalid spinner template")?,
    );
    spinner.set_message(format!("Asking: {}", message));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let reply = dispatcher.respond(message).await;
    spinner.finish_and_clear();

    match reply.with_context(|| format!("Failed to answer '{}'", message))? {
        Some(reply) => print_reply(&reply),
        None => println!("{}", "No reply (not a command, or nothing to say)".yellow()),
    }

    Ok(())
}

fn print_reply(reply: &Reply) {
    match reply {
        Reply::Embed(embed) => {
            println!("{}", embed.title.cyan().bold());
            println!("{}", "=".repeat(50));
            println!("{}", embed.description.trim_end());
            if let Some(footer) = &embed.footer {
                println!("\n{}", footer.yellow());
            }
        }
        Reply::Text(text) => println!("{}", text.green()),
    }
}

fn show_setup_guide() {
    println!("{}", "phishbot Setup Guide".cyan().bold());
    println!("{}", "=".repeat(50));

    println!("\n{}", "1. Discord Bot Setup".yellow());
    println!("   - Go to https://discord.com/developers/applications");
    println!("   - Create an application and add a bot");
    println!("   - Enable the Message Content intent");
    println!("   - Copy the bot token");

    println!("\n{}", "2. API Tokens".yellow());
    println!("   - phish.in: request an API token at https://phish.in/api-docs");
    println!("   - phish.net: request an API key at https://api.phish.net/keys");

    println!("\n{}", "3. Configuration".yellow());
    println!("   - Create a .env file with:");
    println!("     DISCORD_TOKEN=your_discord_bot_token");
    println!("     PHISHIN_TOKEN=your_phishin_token");
    println!("     PHISHNET_TOKEN=your_phishnet_api_key");
    println!("     BOT_TIMEZONE=local                (or UTC, or an offset like -05:00)");
    println!("     LAST_PLAYED_COUNT=4               (optional)");
    println!("     LONGEST_COUNT=3                   (optional)");
    println!("     REQUEST_TIMEOUT_SECS=5            (optional)");

    println!("\n{}", "4. Chat Commands".yellow());
    println!("   - .setlist 8/31/21        (setlist for a date)");
    println!("   - .random                 (setlist for a random show)");
    println!("   - .lastplayed Tweezer     (most recent plays of a song)");
    println!("   - .longest Tweezer        (longest versions of a song)");
    println!("   - .nextshow               (next show on the calendar)");
    println!("   - .daysuntil 12/31/25     (countdown to a date)");

    println!("\n{}", "5. Usage".yellow());
    println!("   - phishbot ask .setlist 8/31/21   (try a command in the terminal)");
    println!("   - phishbot run                    (start the bot)");

    println!("\n{}", "Ready to rock!".green());
}
