//! Command-line front end for side-by-side feature comparison documents.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use sidebyside::check::{CheckOutcome, check_path};
use sidebyside::exit_codes;
use sidebyside::io::config::{CONFIG_FILE, init_config, load_config};
use sidebyside::logging;
use sidebyside::lookup::{list_titles, show_entry};
use sidebyside::publish::{publish, resolve_format};
use sidebyside::render::Format;

#[derive(Parser)]
#[command(
    name = "sidebyside",
    version,
    about = "Check, query and render side-by-side feature comparison documents"
)]
struct Cli {
    /// Config file (missing file means defaults).
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config file at `--config`.
    Init {
        /// Overwrite an existing config file.
        #[arg(short, long)]
        force: bool,
    },
    /// Print entry titles in document order.
    List {
        /// Markdown or JSON document.
        input: PathBuf,
    },
    /// Print one entry, looked up by exact title.
    Show { input: PathBuf, title: String },
    /// Report malformed entries and duplicate titles.
    Check { input: PathBuf },
    /// Render the document to markdown, HTML or JSON.
    Render {
        input: PathBuf,
        /// Output file (stdout when omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format (default: from output extension, then config).
        #[arg(short, long, value_enum)]
        format: Option<Format>,
        /// Fail on the first malformed entry instead of skipping it.
        #[arg(long)]
        strict: bool,
    },
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::for_error(&err)
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::List { input } => cmd_list(&input),
        Command::Show { input, title } => cmd_show(&input, &title),
        Command::Check { input } => cmd_check(&input),
        Command::Render {
            input,
            output,
            format,
            strict,
        } => cmd_render(&cli.config, &input, output.as_deref(), format, strict),
    }
}

fn cmd_init(config_path: &Path, force: bool) -> Result<i32> {
    init_config(config_path, force)?;
    println!("init: wrote {}", config_path.display());
    Ok(exit_codes::OK)
}

fn cmd_list(input: &Path) -> Result<i32> {
    for title in list_titles(input)? {
        println!("{title}");
    }
    Ok(exit_codes::OK)
}

fn cmd_show(input: &Path, title: &str) -> Result<i32> {
    print!("{}", show_entry(input, title)?);
    Ok(exit_codes::OK)
}

fn cmd_check(input: &Path) -> Result<i32> {
    match check_path(input)? {
        CheckOutcome::Clean { entries } => {
            println!("ok: entries={entries}");
            Ok(exit_codes::OK)
        }
        CheckOutcome::Problems(problems) => {
            for problem in problems {
                println!("malformed: {problem}");
            }
            Ok(exit_codes::MALFORMED)
        }
    }
}

fn cmd_render(
    config_path: &Path,
    input: &Path,
    output: Option<&Path>,
    format: Option<Format>,
    strict: bool,
) -> Result<i32> {
    let config = load_config(config_path)?;
    let mut options = config.render_options();
    options.format = resolve_format(format, output, config.format);
    options.strict |= strict;

    let rendered = publish(input, output, &options)?;
    for skipped in rendered.skipped {
        eprintln!("warning: skipped {skipped}");
    }
    Ok(exit_codes::OK)
}
