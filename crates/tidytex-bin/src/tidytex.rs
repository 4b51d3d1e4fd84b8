use clap::Parser;
use colored::Colorize;
use std::io::Read;
use std::path::PathBuf;
use tidytex::config;
use tidytex::script;

/// Clean up a LaTeX file: collapse stray whitespace and normalize paragraph
/// breaks, leaving commands and environments intact.
#[derive(Parser)]
#[clap(version)]
struct Cli {
    /// Path to the LaTeX file to clean, or `-` to read from standard input
    #[arg(default_value = "-")]
    input: String,

    /// Path to a JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args: Cli = Cli::parse();
    if let Err(err) = run(args) {
        println!["{}: {err}", "error".red().bold()];
        std::process::exit(1);
    }
}

fn run(args: Cli) -> Result<(), String> {
    let config = load_config(args.config)?;
    let source = match args.input.as_str() {
        "-" => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!["failed to read standard input: {err}"])?;
            buffer
        }
        path => std::fs::read_to_string(path)
            .map_err(|err| format!["failed to open file {path:?}: {err}"])?,
    };
    let cleaned = script::clean(config, &source).map_err(|err| err.to_string())?;
    println!["{cleaned}"];
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<config::Config, String> {
    let path = match path {
        None => return Ok(Default::default()),
        Some(path) => path,
    };
    let contents = std::fs::read_to_string(&path)
        .map_err(|err| format!["failed to open config file {:?}: {err}", &path])?;
    let file: config::File = serde_json::from_str(&contents)
        .map_err(|err| format!["failed to parse config file {:?}: {err}", &path])?;
    file.into_config()
        .map_err(|err| format!["invalid pattern in config file {:?}: {err}", &path])
}
