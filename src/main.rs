use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use purenote::cli::{
    authenticate, handle_audit_command, handle_entry_command, handle_export_command,
    handle_tag_command, handle_user_command, EntryCommands, ExportArgs, TagCommands, UserCommands,
};
use purenote::config::{PureNotePaths, Settings};
use purenote::crypto::CryptoError;
use purenote::error::PureNoteResult;
use purenote::logging;
use purenote::storage::{initialize_storage, Storage};
use purenote::PureNoteError;

#[derive(Parser)]
#[command(
    name = "purenote",
    version,
    about = "Encrypted personal diary",
    long_about = "PureNote keeps a personal diary on your machine. Entry text is \
                  encrypted with AES-256-GCM under a key derived from a content \
                  password only you know."
)]
struct Cli {
    /// Username or email to act as
    #[arg(short, long, global = true, env = "PURENOTE_USER")]
    user: Option<String>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show configuration and data locations
    Config,

    /// User account commands
    #[command(subcommand)]
    User(UserCommands),

    /// Diary entry commands
    #[command(subcommand, alias = "e")]
    Entry(EntryCommands),

    /// Tag commands
    #[command(subcommand)]
    Tag(TagCommands),

    /// Export your diary
    Export(ExportArgs),

    /// Show your recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    run(cli).map_err(report)
}

fn run(cli: Cli) -> PureNoteResult<()> {
    let paths = PureNotePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.set_audit_enabled(settings.audit_enabled);
    storage.load_all()?;

    let user_arg = cli.user.as_deref();

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing PureNote at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next, create a user:");
            println!("  purenote user register <username> --email <email>");
        }
        Some(Commands::Config) => {
            println!("PureNote Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Date format:     {}", settings.date_format);
            println!("  Datetime format: {}", settings.datetime_format);
            println!("  Audit enabled:   {}", settings.audit_enabled);
            println!("  List limit:      {}", settings.list_limit);
        }
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, &settings, user_arg, cmd)?;
        }
        Some(Commands::Entry(cmd)) => {
            let user = authenticate(&storage, user_arg)?;
            handle_entry_command(&storage, &settings, &user, cmd)?;
        }
        Some(Commands::Tag(cmd)) => {
            let user = authenticate(&storage, user_arg)?;
            handle_tag_command(&storage, &user, cmd)?;
        }
        Some(Commands::Export(args)) => {
            let user = authenticate(&storage, user_arg)?;
            handle_export_command(&storage, &user, args)?;
        }
        Some(Commands::Audit { limit }) => {
            let user = authenticate(&storage, user_arg)?;
            handle_audit_command(&storage, &user, limit)?;
        }
        None => {
            println!("PureNote - Encrypted personal diary");
            println!();
            println!("Run 'purenote --help' for usage information.");
        }
    }

    Ok(())
}

/// Turn a library error into the message shown to the user
fn report(err: PureNoteError) -> anyhow::Error {
    match err {
        PureNoteError::Crypto(CryptoError::AuthenticationFailure) => {
            anyhow!("Invalid encryption password (or the entry data has been altered)")
        }
        PureNoteError::Crypto(CryptoError::EncryptionFailure(detail)) => {
            anyhow!("Internal error while encrypting: {}", detail)
        }
        other => other.into(),
    }
}
