mod clipboard;
mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    config::ConfigSubcommand, group::GroupSubcommand, member::MemberSubcommand,
    message::MessageSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "parayan",
    about = "Parayan reading-group roster — track members, rotate chapters, share the weekly message",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding .parayan/ (default: search upward, then home)
    #[arg(long, global = true, env = "PARAYAN_ROOT")]
    root: Option<PathBuf>,

    /// Group to act on, by id or name (default: first group)
    #[arg(long, short = 'g', global = true, env = "PARAYAN_GROUP")]
    group: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .parayan/ with default config and starter group
    Init,

    /// Show this week's reading date and the active group's size
    Status,

    /// Manage groups
    Group {
        #[command(subcommand)]
        subcommand: GroupSubcommand,
    },

    /// Manage members of the active group
    Member {
        #[command(subcommand)]
        subcommand: MemberSubcommand,
    },

    /// Advance every member of the active group to the next chapter
    Rotate {
        /// Confirm the rotation (it cannot be undone)
        #[arg(long)]
        yes: bool,
    },

    /// Generate, show and copy the weekly message
    Message {
        #[command(subcommand)]
        subcommand: MessageSubcommand,
    },

    /// Inspect and validate configuration and stored groups
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
    let group = cli.group.as_deref();

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::Status => cmd::status::run(&root, group, cli.json),
        Commands::Group { subcommand } => cmd::group::run(&root, subcommand, group, cli.json),
        Commands::Member { subcommand } => cmd::member::run(&root, subcommand, group, cli.json),
        Commands::Rotate { yes } => cmd::rotate::run(&root, group, yes, cli.json),
        Commands::Message { subcommand } => cmd::message::run(&root, subcommand, group, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
