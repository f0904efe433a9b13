//! Command-line interface for fnlang
//! Translates an fnlang source file and prints the result to stdout.
//!
//! Usage:
//!   fnlang [`<path>`] [--format `<format>`] [--config `<file>`]  - Translate a source file
//!   fnlang --list-formats                                      - List all available formats
//!
//! Without a path, the `input.path` setting is used (`main.fn` unless a
//! configuration file says otherwise).

use clap::{Arg, ArgAction, Command};
use fnlang::fnlang::config::{Loader, LOCAL_CONFIG_FILE};
use fnlang::fnlang::pipeline::{PipelineError, Translator};
use log::LevelFilter;

fn main() {
    let matches = Command::new("fnlang")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate a typed function definition into C-like syntax")
        .arg(
            Arg::new("path")
                .help("Path to the source file (default: input.path from configuration)")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (e.g., 'c', 'ast-json', 'token-simple')"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let translator = Translator::new();

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&translator);
        return;
    }

    let output = handle_translate_command(
        &translator,
        matches.get_one::<String>("path").map(String::as_str),
        matches.get_one::<String>("format").map(String::as_str),
        matches.get_one::<String>("config").map(String::as_str),
    )
    .unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    });

    print!("{}", output);
}

/// Logs go to stderr; stdout only ever carries the translation
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Handle the translate command
fn handle_translate_command(
    translator: &Translator,
    path: Option<&str>,
    format: Option<&str>,
    config_file: Option<&str>,
) -> Result<String, PipelineError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(config_file) = config_file {
        loader = loader.with_file(config_file);
    }
    if let Some(path) = path {
        loader = loader.set_override("input.path", path)?;
    }
    if let Some(format) = format {
        loader = loader.set_override("output.format", format)?;
    }
    let config = loader.build()?;

    let mut output = translator.load_and_execute(&config.input.path, &config.output.format)?;
    if config.output.trailing_newline {
        output.push('\n');
    }
    Ok(output)
}

/// Handle the list-formats command
fn handle_list_formats_command(translator: &Translator) {
    println!("Available formats:\n");

    for (name, description) in translator.list_formats() {
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
}
