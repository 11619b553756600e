//! Command-line interface for tidycxx
//! Groups, orders and re-comments the include blocks of C/C++ source files.
//!
//! Usage:
//!   tidy-includes `<files>...`              - Print the arranged files to stdout
//!   tidy-includes `<files>...` --in-place   - Rewrite the files
//!   tidy-includes `<files>...` --check      - Show a diff and fail if anything would change
//!   tidy-includes -                         - Arrange stdin

mod classifier;
mod root;

use classifier::ProjectClassifier;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use similar::TextDiff;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tidycxx::{ArrangeError, IncludeArranger};
use tidycxx_config::{ConfigError, Loader, TidyConfig};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const STDIN_MARKER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Print,
    InPlace,
    Check,
}

/// What happened to one input.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Unchanged,
    Changed,
    Failed,
}

fn main() {
    let matches = Command::new("tidy-includes")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Groups, orders and re-comments #include directives in C/C++ sources")
        .arg_required_else_help(true)
        .arg(
            Arg::new("files")
                .help("Source files to arrange ('-' reads stdin)")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("in-place")
                .long("in-place")
                .short('i')
                .help("Rewrite the files instead of printing them")
                .action(ArgAction::SetTrue)
                .conflicts_with("check"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Print a diff and exit with 1 if any file would change")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Additional configuration file, layered over the project's .tidy-includes.toml")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .help("Project root (default: the enclosing git work tree, else the file's directory)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("line-length")
                .long("line-length")
                .short('l')
                .help("Widest line an include comment may produce")
                .value_parser(value_parser!(i64).range(1..)),
        )
        .arg(
            Arg::new("resolve-quoted")
                .long("resolve-quoted")
                .help("Rewrite quoted includes of project files into root-relative <...> includes")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log what is being done to stderr")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    let mode = if matches.get_flag("in-place") {
        Mode::InPlace
    } else if matches.get_flag("check") {
        Mode::Check
    } else {
        Mode::Print
    };

    let files: Vec<&PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(Iterator::collect)
        .unwrap_or_default();
    if mode == Mode::InPlace && files.iter().any(|file| is_stdin(file)) {
        eprintln!("Error: stdin cannot be rewritten in place");
        std::process::exit(1);
    }

    let mut failed = false;
    let mut changed = false;
    for file in files {
        match handle_file(&matches, file, mode) {
            Outcome::Unchanged => {}
            Outcome::Changed => changed = true,
            Outcome::Failed => failed = true,
        }
    }

    if failed || (mode == Mode::Check && changed) {
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_MARKER
}

/// Arrange one input and deliver the result according to `mode`.
fn handle_file(matches: &ArgMatches, path: &Path, mode: Mode) -> Outcome {
    let stdin = is_stdin(path);
    let display_name = if stdin {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    };

    let source = match read_source(path, stdin) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {}: {}", display_name, e);
            return Outcome::Failed;
        }
    };

    let source_dir = if stdin {
        PathBuf::from(".")
    } else {
        root::source_dir(path)
    };
    let project_root = root::project_root(
        matches.get_one::<PathBuf>("root").map(PathBuf::as_path),
        &source_dir,
    );
    debug!(file = %display_name, root = %project_root.display(), "arranging");

    let config = match load_config(matches, &project_root) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration for {}: {}", display_name, e);
            return Outcome::Failed;
        }
    };

    let source_name = (!stdin).then(|| path.to_str()).flatten();
    let resolve_quoted = matches.get_flag("resolve-quoted") && !stdin;
    let arranged = match arrange(&config, &source, source_name, &project_root, path, resolve_quoted) {
        Ok(arranged) => arranged,
        Err(e) => {
            eprintln!("Error arranging {}: {}", display_name, e);
            return Outcome::Failed;
        }
    };

    let outcome = if arranged == source {
        Outcome::Unchanged
    } else {
        Outcome::Changed
    };
    match mode {
        Mode::Print => print!("{}", arranged),
        Mode::Check => {
            if outcome == Outcome::Changed {
                let diff = TextDiff::from_lines(&source, &arranged);
                print!(
                    "{}",
                    diff.unified_diff()
                        .header(&format!("a/{display_name}"), &format!("b/{display_name}"))
                );
            }
        }
        Mode::InPlace => {
            if outcome == Outcome::Changed {
                if let Err(e) = fs::write(path, &arranged) {
                    eprintln!("Error writing {}: {}", display_name, e);
                    return Outcome::Failed;
                }
                debug!(file = %display_name, "rewritten");
            }
        }
    }
    outcome
}

fn read_source(path: &Path, stdin: bool) -> io::Result<String> {
    if stdin {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(path)
    }
}

fn load_config(matches: &ArgMatches, project_root: &Path) -> Result<TidyConfig, ConfigError> {
    let mut loader = Loader::new().with_project_root(project_root);
    if let Some(file) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(file);
    }
    if let Some(line_length) = matches.get_one::<i64>("line-length") {
        loader = loader.set_override("formatting.line_length", *line_length)?;
    }
    loader.build()
}

/// Run the arranger over `source`. On error nothing of the output is used.
fn arrange(
    config: &TidyConfig,
    source: &str,
    source_name: Option<&str>,
    project_root: &Path,
    path: &Path,
    resolve_quoted: bool,
) -> Result<String, ArrangeError> {
    let mut arranger = IncludeArranger::new(config.arranger_options(source_name), config.sequencer());
    if resolve_quoted {
        arranger = arranger.with_classifier(ProjectClassifier::new(project_root, path));
    }
    for line in source.split_inclusive('\n') {
        arranger.feed(line);
    }
    arranger.flush()?;
    Ok(arranger.into_sink())
}
