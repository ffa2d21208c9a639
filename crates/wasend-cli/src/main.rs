mod cmd;
mod output;
mod root;
mod terminal;

use clap::{Parser, Subcommand};
use cmd::{
    config::ConfigSubcommand, contact::ContactSubcommand, pending::PendingSubcommand,
    template::TemplateSubcommand, Reported,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "wasend",
    about = "Keep a list of sales contacts and open personalized WhatsApp chats one at a time",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .wasend/)
    #[arg(long, global = true, env = "WASEND_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .wasend/ with a default config and an empty contact list
    Init,

    /// Add, edit, list, and delete contacts
    Contact {
        #[command(subcommand)]
        subcommand: ContactSubcommand,
    },

    /// Answer confirmations left by delete and clear
    Pending {
        #[command(subcommand)]
        subcommand: PendingSubcommand,
    },

    /// Manage the message template
    Template {
        #[command(subcommand)]
        subcommand: TemplateSubcommand,
    },

    /// Open a personalized chat with one contact
    Send {
        /// Phone of the contact
        phone: String,
        /// Message template to use instead of the saved one
        #[arg(long, short = 'm')]
        message: Option<String>,
        /// Print the link without opening a browser
        #[arg(long)]
        no_open: bool,
    },

    /// List contact categories and their labels
    Categories,

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    tracing::debug!(root = %root.display(), "resolved project root");

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Contact { subcommand } => cmd::contact::run(&root, subcommand, cli.json),
        Commands::Pending { subcommand } => cmd::pending::run(&root, subcommand, cli.json),
        Commands::Template { subcommand } => cmd::template::run(&root, subcommand, cli.json),
        Commands::Send {
            phone,
            message,
            no_open,
        } => cmd::send::run(&root, &phone, message.as_deref(), no_open, cli.json),
        Commands::Categories => cmd::categories::run(cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Reported errors were already printed by the feedback channel.
        if e.downcast_ref::<Reported>().is_none() {
            eprintln!("error: {e:#}");
        }
        std::process::exit(1);
    }
}
