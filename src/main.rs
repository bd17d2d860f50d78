use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sphinx_me::cli::commands;
use sphinx_me::cli::{InstallArgs, Output, ResolveArgs, ResolveFormat};

#[derive(Parser)]
#[command(name = "sphinx-me", args_conflicts_with_subcommands = true)]
#[command(
    version,
    about = "Bootstrap Sphinx documentation that reads its metadata from your project"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    install: InstallFlags,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(clap::Args, Clone, Default)]
struct InstallFlags {
    #[arg(long, help = "Project root (default: current directory)")]
    path: Option<PathBuf>,
    #[arg(long, help = "Documentation directory relative to the project root")]
    docs_dir: Option<String>,
    #[arg(long, short, help = "Overwrite an existing conf.py and index.rst")]
    force: bool,
}

impl From<InstallFlags> for InstallArgs {
    fn from(flags: InstallFlags) -> Self {
        Self {
            path: flags.path,
            docs_dir: flags.docs_dir,
            force: flags.force,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create docs/conf.py and docs/index.rst (the default command)
    Install {
        #[command(flatten)]
        flags: InstallFlags,
    },

    /// Print project metadata for a Sphinx conf.py
    Resolve {
        #[arg(long, help = "Path to the conf.py being configured")]
        conf: PathBuf,
        #[arg(short = 'f', long, value_enum, default_value_t = ResolveFormat::Json)]
        format: ResolveFormat,
        #[arg(long, help = "Fail instead of prompting for missing metadata")]
        no_input: bool,
        #[arg(long, help = "Version to use when none is found")]
        default_version: Option<String>,
        #[arg(long, help = "Author to use when none is found")]
        default_author: Option<String>,
    },

    /// Manage configuration
    Config {
        #[arg(long, help = "Project root (default: current directory)")]
        path: Option<PathBuf>,
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            value_parser = ["toml", "json"],
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31msphinx-me encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Output::new().error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    // stdout carries command output; logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = Output::quiet(cli.quiet);

    match cli.command {
        None => {
            commands::install::run(cli.install.into(), &output)?;
        }
        Some(Commands::Install { flags }) => {
            commands::install::run(flags.into(), &output)?;
        }
        Some(Commands::Resolve {
            conf,
            format,
            no_input,
            default_version,
            default_author,
        }) => {
            commands::resolve::run(ResolveArgs {
                conf,
                format,
                no_input,
                default_version,
                default_author,
            })?;
        }
        Some(Commands::Config { path, action }) => {
            let root = match path {
                Some(path) => path,
                None => std::env::current_dir()?,
            };
            match action {
                ConfigAction::Show { format } => commands::config::show(&root, &format)?,
                ConfigAction::Path => commands::config::path(&root)?,
                ConfigAction::Init { global, force } => {
                    if global {
                        commands::config::init_global(force, &output)?;
                    } else {
                        commands::config::init_project(&root, force, &output)?;
                    }
                }
            }
        }
    }

    Ok(())
}
