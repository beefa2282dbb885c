//! Remembrall - terminal flashcards
//!
//! CLI entry point with global panic handler.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use remembrall::config::{crash_log_path, log_path, remembrall_home, Config};
use remembrall::core::StudyMode;
use remembrall::error::{exit_codes, RemembrallError};
use remembrall::shell::{restore_terminal, Shell, TerminalConsole};
use remembrall::storage::{FileSetStore, SetStore};

// =============================================================================
// CLI Definition
// =============================================================================

/// Remembrall - terminal flashcards
#[derive(Parser)]
#[command(name = "remembrall")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Skip the intro banner
    #[arg(long)]
    quick: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the home directory, an empty set store and a default config
    Init {
        /// Rewrite existing files (a store holding sets is kept)
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Import a tab-separated file as a new set
    Convert {
        /// File with one `term<TAB>definition` per line
        file: PathBuf,
        /// Title for the new set (defaults to the file name)
        #[arg(long, short)]
        title: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// List sets with their card counts
    List {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Find cards in a set whose term contains the query
    Search {
        /// Set title
        set: String,
        /// Case-sensitive term substring
        query: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Delete a set
    Delete {
        /// Set title
        set: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Create a set interactively
    Add,

    /// Study a set
    Study {
        /// Set title
        set: String,
        /// Only the starred cards
        #[arg(long, short)]
        starred: bool,
    },
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    setup_panic_handler();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("remembrall error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Set up the global panic handler.
///
/// On panic, puts the terminal back, appends to crash.log and exits with
/// code 3.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal();
        eprintln!("remembrall panic: {}", info);

        if let Some(crash_log) = crash_log_path() {
            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log)
            {
                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                let _ = writeln!(file, "[{}] {}", timestamp, info);
            }
        }

        std::process::exit(exit_codes::CRASH);
    }));
}

/// Install a file subscriber at `<home>/remembrall.log`.
///
/// Logging is skipped when the home directory does not exist yet or the file
/// cannot be opened. The terminal is never written to.
fn init_logging(config: &Config) {
    let Some(path) = log_path() else {
        return;
    };
    if !path.parent().is_some_and(Path::is_dir) {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = Config::load();
    init_logging(&config);

    if cli.quick {
        config.intro.enabled = false;
    }

    match cli.command {
        None => run_menu(config),
        Some(Commands::Init { force, json, quiet }) => run_init(json, quiet, force),
        Some(Commands::Convert {
            file,
            title,
            json,
            quiet,
        }) => run_convert(file, title, json, quiet),
        Some(Commands::List { json, quiet }) => run_list(json, quiet),
        Some(Commands::Search {
            set,
            query,
            json,
            quiet,
        }) => run_search(&set, &query, json, quiet),
        Some(Commands::Delete { set, json, quiet }) => run_delete(&set, json, quiet),
        Some(Commands::Add) => run_add(config),
        Some(Commands::Study { set, starred }) => run_study(config, &set, starred),
    }
}

/// Convert a success flag to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

/// Exit code for the outcome of an interactive run.
fn shell_exit_code(result: &remembrall::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(RemembrallError::NotInitialized { .. }) => {
            ExitCode::from(exit_codes::NOT_INITIALIZED as u8)
        }
        Err(_) => ExitCode::from(exit_codes::ERROR as u8),
    }
}

fn print_output(formatted: &str) {
    if !formatted.is_empty() {
        println!("{}", formatted.trim_end());
    }
}

// =============================================================================
// Interactive commands
// =============================================================================

type TerminalShell = Shell<TerminalConsole, FileSetStore, StdRng>;

/// Open the store and take over the terminal.
fn open_shell(config: Config) -> remembrall::Result<TerminalShell> {
    let store = FileSetStore::new()?;
    if !store.is_initialized() {
        // Report before switching screens
        return Err(RemembrallError::not_initialized(store.path()));
    }
    let console = TerminalConsole::new(config.display.clone())?;
    Shell::new(console, store, config, StdRng::from_entropy())
}

/// Run an interactive action. The terminal is restored before anything is
/// printed.
fn run_interactive(
    config: Config,
    action: impl FnOnce(&mut TerminalShell) -> remembrall::Result<()>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let result = open_shell(config).and_then(|mut shell| action(&mut shell));
    if let Err(e) = &result {
        tracing::error!(error = %e, "interactive run failed");
        eprintln!("remembrall: {}", e);
    }
    Ok(shell_exit_code(&result))
}

fn run_menu(config: Config) -> Result<ExitCode, Box<dyn std::error::Error>> {
    run_interactive(config, |shell| {
        shell.intro()?;
        shell.run()
    })
}

fn run_add(config: Config) -> Result<ExitCode, Box<dyn std::error::Error>> {
    run_interactive(config, |shell| shell.add_set().map(|_| ()))
}

fn run_study(
    config: Config,
    set: &str,
    starred: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mode = if starred {
        StudyMode::Starred
    } else {
        StudyMode::All
    };
    run_interactive(config, |shell| {
        if !shell.collection().contains(set) {
            return Err(RemembrallError::set_not_found(set));
        }
        shell.study_set(set, mode)
    })
}

// =============================================================================
// One-shot commands
// =============================================================================

fn run_init(json: bool, quiet: bool, force: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use remembrall::cli::init::{InitCommand, InitOptions};

    let home = remembrall_home().ok_or("could not determine the remembrall home directory")?;
    let cmd = InitCommand::new(home);
    let options = InitOptions { json, quiet, force };

    let output = cmd.run(&options);
    print_output(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_convert(
    file: PathBuf,
    title: Option<String>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use remembrall::cli::convert::{ConvertCommand, ConvertOptions};

    let cmd = ConvertCommand::new(FileSetStore::new()?, file);
    let options = ConvertOptions { json, quiet, title };

    let output = cmd.run(&options);
    print_output(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_list(json: bool, quiet: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use remembrall::cli::list::{ListCommand, ListOptions};

    let cmd = ListCommand::new(FileSetStore::new()?);
    let options = ListOptions { json, quiet };

    let output = cmd.run(&options);
    print_output(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_search(
    set: &str,
    query: &str,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use remembrall::cli::search::{SearchCommand, SearchOptions};

    let cmd = SearchCommand::new(FileSetStore::new()?);
    let options = SearchOptions { json, quiet };

    let output = cmd.run(set, query, &options);
    print_output(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_delete(set: &str, json: bool, quiet: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use remembrall::cli::delete::{DeleteCommand, DeleteOptions};

    let cmd = DeleteCommand::new(FileSetStore::new()?);
    let options = DeleteOptions { json, quiet };

    let output = cmd.run(set, &options);
    print_output(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::ERROR, 1);
        assert_eq!(exit_codes::NOT_INITIALIZED, 2);
        assert_eq!(exit_codes::CRASH, 3);
    }

    #[test]
    fn test_success_to_exit_code() {
        assert_eq!(
            success_to_exit_code(true),
            ExitCode::from(exit_codes::SUCCESS as u8)
        );
        assert_eq!(
            success_to_exit_code(false),
            ExitCode::from(exit_codes::ERROR as u8)
        );
    }

    #[test]
    fn test_shell_exit_code() {
        assert_eq!(
            shell_exit_code(&Ok(())),
            ExitCode::from(exit_codes::SUCCESS as u8)
        );
        assert_eq!(
            shell_exit_code(&Err(RemembrallError::not_initialized("/tmp/x/sets.json"))),
            ExitCode::from(exit_codes::NOT_INITIALIZED as u8)
        );
        assert_eq!(
            shell_exit_code(&Err(RemembrallError::corrupt("/tmp/x/sets.json", "bad"))),
            ExitCode::from(exit_codes::ERROR as u8)
        );
    }

    #[test]
    fn test_cli_parse_bare() {
        let cli = Cli::parse_from(["remembrall"]);
        assert!(!cli.quick);
        assert!(cli.command.is_none());

        let cli = Cli::parse_from(["remembrall", "--quick"]);
        assert!(cli.quick);
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["remembrall", "init", "--force", "--json"]);
        match cli.command {
            Some(Commands::Init { force, json, quiet }) => {
                assert!(force);
                assert!(json);
                assert!(!quiet);
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_cli_parse_convert() {
        let cli = Cli::parse_from(["remembrall", "convert", "words.txt", "--title", "Words"]);
        match cli.command {
            Some(Commands::Convert { file, title, .. }) => {
                assert_eq!(file, PathBuf::from("words.txt"));
                assert_eq!(title.as_deref(), Some("Words"));
            }
            _ => panic!("Expected Convert command"),
        }
    }

    #[test]
    fn test_cli_parse_search() {
        let cli = Cli::parse_from(["remembrall", "search", "Biology 101", "ATP", "-q"]);
        match cli.command {
            Some(Commands::Search {
                set, query, quiet, ..
            }) => {
                assert_eq!(set, "Biology 101");
                assert_eq!(query, "ATP");
                assert!(quiet);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_parse_search_empty_query() {
        let cli = Cli::parse_from(["remembrall", "search", "Spanish", ""]);
        match cli.command {
            Some(Commands::Search { query, .. }) => assert_eq!(query, ""),
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_parse_list_and_delete() {
        let cli = Cli::parse_from(["remembrall", "list", "--json"]);
        assert!(matches!(
            cli.command,
            Some(Commands::List {
                json: true,
                quiet: false
            })
        ));

        let cli = Cli::parse_from(["remembrall", "delete", "Spanish"]);
        match cli.command {
            Some(Commands::Delete { set, .. }) => assert_eq!(set, "Spanish"),
            _ => panic!("Expected Delete command"),
        }
    }

    #[test]
    fn test_cli_parse_study() {
        let cli = Cli::parse_from(["remembrall", "study", "Spanish", "--starred"]);
        match cli.command {
            Some(Commands::Study { set, starred }) => {
                assert_eq!(set, "Spanish");
                assert!(starred);
            }
            _ => panic!("Expected Study command"),
        }

        let cli = Cli::parse_from(["remembrall", "add"]);
        assert!(matches!(cli.command, Some(Commands::Add)));
    }

    #[test]
    fn test_cli_rejects_missing_set() {
        assert!(Cli::try_parse_from(["remembrall", "study"]).is_err());
        assert!(Cli::try_parse_from(["remembrall", "search", "Spanish"]).is_err());
    }
}
