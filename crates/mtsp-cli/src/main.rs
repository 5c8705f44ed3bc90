mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{EXIT_FAILURE, EXIT_FETCH_ERROR, EXIT_MANIFEST_ERROR};
use std::path::PathBuf;
use std::process::ExitCode;

pub const BIN_NAME: &str = "mtsp";

#[derive(Debug, Parser)]
#[command(
    name = "mtsp",
    version,
    about = "Decode MTSP container manifests for 3D scene bundles"
)]
struct Cli {
    /// Fetch configuration file (defaults to ~/.config/mtsp/fetch.json if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the manifest locator derived from any locator.
    Resolve {
        /// Locator such as https://host/space/, .../index.html or .../index.mtsp.
        locator: String,
    },
    /// Parse a manifest file from disk.
    Parse {
        /// Path to the .mtsp file.
        file: PathBuf,
        /// Locator the manifest is served from; relative paths resolve against it.
        #[arg(long)]
        base: Option<String>,
    },
    /// Fetch and decode the container behind a locator.
    Decode {
        /// Locator such as https://host/space/, .../index.html or .../index.mtsp.
        locator: String,
    },
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
        /// Write the completion script into this directory instead of stdout.
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Generate man pages in the specified directory.
    ManPages {
        /// Output directory for man pages.
        #[arg(default_value = "man")]
        dir: PathBuf,
    },
}

fn exit_code_for(msg: &str) -> u8 {
    if msg.starts_with("manifest error:") || msg.starts_with("failed to read manifest") {
        EXIT_MANIFEST_ERROR
    } else if msg.starts_with("manifest unavailable") {
        EXIT_FETCH_ERROR
    } else {
        EXIT_FAILURE
    }
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("MTSP_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let json_output = cli.json;
    let result = match cli.command {
        Commands::Resolve { locator } => commands::resolve::run(&locator, json_output),
        Commands::Parse { file, base } => commands::parse::run(&file, base.as_deref(), json_output),
        Commands::Decode { locator } => {
            commands::decode::run(&locator, cli.config.as_deref(), json_output)
        }
        Commands::Completions { shell, dir } => {
            commands::completions::run::<Cli>(shell, dir.as_deref())
        }
        Commands::ManPages { dir } => commands::man_pages::run::<Cli>(&dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            ExitCode::from(exit_code_for(&msg))
        }
    }
}
