use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process;
use src_slim::cmd::{self, Overrides};
use src_slim::project::FileFilter;

/// Multi-language source minifier
///
/// src-slim strips comments and redundant whitespace from source files and
/// writes the result next to each source as `<stem>.min.<ext>`, leaving
/// string literals untouched.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Minify every supported file under a directory
    Minify {
        /// Project root
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Only minify these languages (names or extensions)
        #[arg(short, long, value_delimiter = ',')]
        languages: Vec<String>,

        /// Only minify files with these extensions
        #[arg(short, long, value_delimiter = ',')]
        extensions: Vec<String>,

        /// Profile to use: safe, balanced, aggressive
        #[arg(short, long)]
        profile: Option<String>,

        /// Artifact suffix (default: .min)
        #[arg(long)]
        suffix: Option<String>,

        /// Worker threads (default: one per core)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Keep line numbers stable
        #[arg(long)]
        keep_lines: bool,

        /// Output as JSON (for CI/CD integration)
        #[arg(long)]
        json: bool,
    },

    /// Minify a single file
    File {
        /// Source file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Language to use instead of the one matching the extension
        #[arg(short, long)]
        language: Option<String>,

        /// Profile to use: safe, balanced, aggressive
        #[arg(short, long)]
        profile: Option<String>,

        /// Artifact suffix (default: .min)
        #[arg(long)]
        suffix: Option<String>,

        /// Keep line numbers stable
        #[arg(long)]
        keep_lines: bool,

        /// Print the result instead of writing the artifact
        #[arg(long)]
        stdout: bool,
    },

    /// Delete generated artifacts
    Clean {
        /// Project root
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Only delete artifacts of sources with these extensions
        #[arg(short, long, value_delimiter = ',')]
        extensions: Vec<String>,

        /// Artifact suffix (default: .min)
        #[arg(long)]
        suffix: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List supported languages
    Languages {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize src-slim configuration
    Init {
        /// Profile to use: safe, balanced, aggressive
        #[arg(short, long, default_value = "balanced")]
        profile: String,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match cli.command {
        Some(Commands::Minify {
            dir,
            languages,
            extensions,
            profile,
            suffix,
            jobs,
            keep_lines,
            json,
        }) => {
            let filter = FileFilter {
                languages,
                extensions,
            };
            let overrides = Overrides {
                profile,
                suffix,
                jobs,
                keep_lines,
            };
            cmd::cmd_minify(&dir, &filter, &overrides, json)
        }
        Some(Commands::File {
            file,
            language,
            profile,
            suffix,
            keep_lines,
            stdout,
        }) => {
            let overrides = Overrides {
                profile,
                suffix,
                jobs: None,
                keep_lines,
            };
            cmd::cmd_file(&file, language.as_deref(), &overrides, stdout)
        }
        Some(Commands::Clean {
            dir,
            extensions,
            suffix,
            json,
        }) => {
            let overrides = Overrides {
                suffix,
                ..Overrides::default()
            };
            cmd::cmd_clean(&dir, &extensions, &overrides, json)
        }
        Some(Commands::Languages { json }) => cmd::cmd_languages(json),
        Some(Commands::Init { profile, force }) => std::env::current_dir()
            .map_err(anyhow::Error::from)
            .and_then(|root| cmd::cmd_init(&root, &profile, force)),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(shell, &mut Cli::command(), &mut std::io::stdout());
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("src-slim v{}", env!("CARGO_PKG_VERSION"));
            println!("Multi-language source minifier\n");
            println!("Usage: src-slim <COMMAND>\n");
            println!("Commands:");
            println!("  minify     Minify every supported file under a directory");
            println!("  file       Minify a single file");
            println!("  clean      Delete generated artifacts");
            println!("  languages  List supported languages");
            println!("  init       Initialize src-slim configuration");
            println!("\nRun 'src-slim <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use src_slim::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
