use std::{
    collections::HashSet,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Arg, ArgAction, Command};
use goblank::{Error, Rewrite, Settings};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use walkdir::{DirEntry, WalkDir};

mod main_tests;

/// Initialise logging to stderr, only when `GOBLANK_LOG` or `RUST_LOG` is set
fn init_tracing() {
    let filter = match std::env::var("GOBLANK_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
        Err(_) => return,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn command() -> Command {
    Command::new("goblank")
        .about("Rename unused parameters in .go files to _")
        .arg(
            Arg::new("RECV")
                .short('r')
                .long("recv")
                .action(ArgAction::SetTrue)
                .help("Include receivers in scan"),
        )
        .arg(
            Arg::new("RET")
                .short('R')
                .long("ret")
                .action(ArgAction::SetTrue)
                .help("Include named results in scan"),
        )
        .arg(
            Arg::new("WRITE")
                .short('w')
                .long("write")
                .action(ArgAction::SetTrue)
                .help("Overwrite files with changes"),
        )
        .arg(
            Arg::new("LIST")
                .short('l')
                .long("list")
                .action(ArgAction::SetTrue)
                .help("Only report unused bindings instead of printing the rewritten source"),
        )
        .arg(
            Arg::new("FAIL")
                .short('f')
                .long("fail")
                .action(ArgAction::SetTrue)
                .help("Exit with 1 if any file would be altered"),
        )
        .arg(
            Arg::new("OUTPUT_FORMAT")
                .short('o')
                .long("output-format")
                .value_parser(["human-readable", "json"])
                .default_value("human-readable")
                .help("Report format for --list"),
        )
        .arg(
            Arg::new("HIDDEN")
                .short('H')
                .long("hidden")
                .action(ArgAction::SetTrue)
                .help("Recurse into hidden subdirectories and process hidden .go files"),
        )
        .arg(
            Arg::new("EXCLUDES")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Files or directories to exclude from processing"),
        )
        .arg(
            Arg::new("FILE_PATHS")
                .action(ArgAction::Append)
                .help(".go files, or directories to search for .go files"),
        )
}

/// Usage text, as `--help` prints it
fn usage(command: &mut Command, out: &mut impl Write) -> io::Result<()> {
    write!(out, "{}", command.render_help())?;
    out.flush()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map_or(false, |name| name.starts_with('.'))
}

fn is_go_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && entry.path().extension().map_or(false, |ext| ext == "go")
}

/// Every file named by `paths`, walking directories for `.go` files
fn discover(paths: &[String], hidden: bool, excludes: &HashSet<PathBuf>) -> Vec<PathBuf> {
    let excluded = |path: &Path| {
        fs::canonicalize(path).map_or(false, |path| excludes.contains(&path))
    };

    let mut files = Vec::new();
    for path in paths {
        let path = Path::new(path);
        if path.is_file() {
            if !excluded(path) {
                files.push(path.to_path_buf());
            }
            continue;
        }
        let entries = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                (hidden || entry.depth() == 0 || !is_hidden(entry)) && !excluded(entry.path())
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    eprintln!("{}", err);
                    None
                }
            })
            .filter(is_go_file);
        files.extend(entries.map(DirEntry::into_path));
    }
    files
}

fn overwrite(path: &Path, text: &str) -> io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)?;
    file.write_all(text.as_bytes())?;
    file.sync_all()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Source,
    Human,
    Json,
}

fn main() -> ExitCode {
    init_tracing();

    let mut command = command();
    let matches = command.clone().get_matches();

    let file_paths = matches
        .get_many::<String>("FILE_PATHS")
        .map(|paths| paths.cloned().collect::<Vec<_>>())
        .unwrap_or_default();
    if file_paths.is_empty() {
        // usage on stdout, like --help
        if let Err(err) = usage(&mut command, &mut io::stdout().lock()) {
            eprintln!("{}", err);
        }
        return ExitCode::from(1);
    }

    let settings = Settings {
        include_receiver: matches.get_flag("RECV"),
        include_named_results: matches.get_flag("RET"),
    };
    let write = matches.get_flag("WRITE");
    let output = match (
        matches.get_flag("LIST"),
        matches.get_one::<String>("OUTPUT_FORMAT").map(String::as_str),
    ) {
        (false, _) => Output::Source,
        (true, Some("json")) => Output::Json,
        (true, _) => Output::Human,
    };
    let hidden = matches.get_flag("HIDDEN");
    let excludes = matches
        .get_many::<String>("EXCLUDES")
        .map(|excludes| {
            excludes
                .filter_map(|exclude| fs::canonicalize(exclude).ok())
                .collect::<HashSet<_>>()
        })
        .unwrap_or_default();

    let mut any_altered = false;
    let stdout = io::stdout();
    for path in discover(&file_paths, hidden, &excludes) {
        let file = path.display().to_string();
        debug!(%file, "processing");

        let Rewrite {
            altered,
            unused,
            source,
            text,
        } = match settings.rewrite_file(&path) {
            Ok(rewrite) => rewrite,
            // names the path itself
            Err(err @ Error::Io { .. }) => {
                eprintln!("{}", err);
                continue;
            }
            Err(err) => {
                eprintln!("{} {}", file, err);
                continue;
            }
        };
        any_altered |= altered;

        let printed = match output {
            Output::Source if !write => stdout.lock().write_all(text.as_bytes()),
            Output::Source => Ok(()),
            Output::Human => goblank::report::print(file.clone(), &source, &unused),
            #[cfg(feature = "json-out")]
            Output::Json => {
                let json = goblank::report::json(&file, &source, &unused);
                writeln!(stdout.lock(), "{}", json)
            }
            #[cfg(not(feature = "json-out"))]
            Output::Json => {
                eprintln!("json output was not enabled at build time");
                return ExitCode::from(2);
            }
        };
        if let Err(err) = printed {
            eprintln!("{}", err);
            return ExitCode::from(2);
        }

        if write {
            if altered {
                if let Err(err) = overwrite(&path, &text) {
                    eprintln!("{} {}", file, err);
                    return ExitCode::from(2);
                }
                println!("{} overwritten", file);
            } else {
                println!("{} unaltered", file);
            }
        }
    }

    if matches.get_flag("FAIL") && any_altered {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
