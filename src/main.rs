//! Prefix Squeeze - Main entrypoint.
//!
//! Loads configuration, initializes logging and dispatches to the file
//! drivers in [`prefix_squeeze_lib::commands`].

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use prefix_squeeze_lib::commands;
use prefix_squeeze_lib::config::{ConfigLoader, LogConfig, SqueezeConfig, ENV_PREFIX};
use prefix_squeeze_lib::error::{
    ErrorContext, ErrorReporter, SqueezeError, SqueezeResult, TracingErrorReporter,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for Prefix Squeeze.
#[derive(Parser, Debug)]
#[clap(name = "prefix_squeeze", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a text file and store its trie next to the output
    Compress {
        /// Text file to compress
        #[clap(value_parser)]
        input: PathBuf,

        /// Where to write the compressed text
        #[clap(value_parser)]
        output: PathBuf,

        /// Where to write the trie snapshot (defaults to `<output>.<extension>`)
        #[clap(short, long, value_parser)]
        trie: Option<PathBuf>,
    },

    /// Expand a compressed file using its trie snapshot
    Decompress {
        /// Trie snapshot written by `compress`
        #[clap(value_parser)]
        trie: PathBuf,

        /// Compressed text file
        #[clap(value_parser)]
        input: PathBuf,

        /// Where to write the expanded text (stdout when omitted)
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
    },

    /// List the words of a snapshot that start with a prefix
    Query {
        /// Trie snapshot
        #[clap(value_parser)]
        trie: PathBuf,

        /// Prefix to look up (empty lists every word)
        #[clap(default_value = "")]
        prefix: String,
    },

    /// Print statistics about a snapshot
    Inspect {
        /// Trie snapshot
        #[clap(value_parser)]
        trie: PathBuf,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

impl Command {
    /// Name used when reporting a failed command.
    fn name(&self) -> &'static str {
        match self {
            Command::Compress { .. } => "compress",
            Command::Decompress { .. } => "decompress",
            Command::Query { .. } => "query",
            Command::Inspect { .. } => "inspect",
            Command::Validate => "validate",
            Command::GenConfig { .. } => "gen-config",
        }
    }

    /// The files a failed command was working on.
    fn details(&self) -> Option<String> {
        match self {
            Command::Compress { input, output, .. } => Some(format!(
                "input: {}, output: {}",
                input.display(),
                output.display()
            )),
            Command::Decompress { trie, input, .. } => Some(format!(
                "trie: {}, input: {}",
                trie.display(),
                input.display()
            )),
            Command::Query { trie, .. } | Command::Inspect { trie } => {
                Some(format!("trie: {}", trie.display()))
            }
            Command::GenConfig { output } => Some(format!("output: {}", output.display())),
            Command::Validate => None,
        }
    }
}

/// Initialize the logging system. Logs go to stderr so that text written to
/// stdout stays clean.
fn init_logging(log: &LogConfig) -> SqueezeResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let installed = if log.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed
        .map_err(|e| SqueezeError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

fn run(command: Command, config: &SqueezeConfig) -> SqueezeResult<()> {
    match command {
        Command::Compress {
            input,
            output,
            trie,
        } => {
            let trie = trie.unwrap_or_else(|| config.snapshot.default_path_for(&output));
            let stats = commands::compress_file(&input, &output, &trie, config)?;
            println!(
                "{} lines, {} words ({} distinct): {} -> {} bytes ({:.1}%)",
                stats.lines,
                stats.words,
                stats.distinct_words,
                stats.input_bytes,
                stats.output_bytes,
                stats.ratio() * 100.0
            );
            Ok(())
        }
        Command::Decompress {
            trie,
            input,
            output,
        } => {
            match output {
                Some(path) => {
                    let file = std::fs::File::create(&path)?;
                    commands::decompress_file(&trie, &input, BufWriter::new(file))?;
                }
                None => {
                    let stdout = io::stdout();
                    commands::decompress_file(&trie, &input, stdout.lock())?;
                }
            }
            Ok(())
        }
        Command::Query { trie, prefix } => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for word in commands::query_snapshot(&trie, &prefix)? {
                writeln!(out, "{word}")?;
            }
            Ok(())
        }
        Command::Inspect { trie } => {
            let summary = commands::inspect_snapshot(&trie)?;
            println!("words:     {}", summary.words);
            println!("nodes:     {}", summary.nodes);
            println!("max depth: {}", summary.max_depth);
            println!("alphabet:  {}", summary.alphabet);
            Ok(())
        }
        Command::Validate => {
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = SqueezeConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| SqueezeError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

/// Main entry point for the application.
fn main() -> SqueezeResult<()> {
    let args = Args::parse();

    let config = match ConfigLoader::new(args.config.as_deref(), ENV_PREFIX).load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    init_logging(&config.log)?;

    let component = args.command.name();
    let details = args.command.details();
    if let Err(error) = run(args.command, &config) {
        let mut context = ErrorContext::new(error, component);
        if let Some(details) = details {
            context = context.with_details(details);
        }
        TracingErrorReporter.report(&context);
        process::exit(1);
    }

    Ok(())
}
