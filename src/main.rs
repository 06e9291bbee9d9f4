use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use mdhtml::{Config, ConfigError};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mdhtml")]
#[command(about = "Convert a Markdown file to an HTML page")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Output HTML file (defaults to input name with .html extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// HTML template containing `{{ Title }}` and `{{ Content }}`
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Config file
    #[arg(short, long, default_value = "mdhtml.toml")]
    config: PathBuf,
}

/// Config from `path`, or the bundled defaults when it is missing or invalid.
///
/// The error is handed back so it can be logged once tracing is set up.
fn load_config(path: &Path) -> (Config, Option<ConfigError>) {
    if !path.exists() {
        return (Config::compiled_default(), None);
    }
    match Config::try_load(path) {
        Ok(config) => (config, None),
        Err(e) => (Config::compiled_default(), Some(e)),
    }
}

fn main() {
    let cli = Cli::parse();
    let (config, config_error) = load_config(&cli.config);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = config_error {
        warn!("{e}; using defaults");
    }

    let markdown = match fs::read_to_string(&cli.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {}: {}", cli.input.display(), e);
            std::process::exit(1);
        }
    };

    let template_path = cli.template.or_else(|| config.page.template.clone());
    let template = match &template_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => mdhtml::DEFAULT_TEMPLATE.to_string(),
    };
    debug!(template = ?template_path, "loaded template");

    let page = match mdhtml::markdown_to_page_with_config(&markdown, &template, &config) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("Error converting {}: {}", cli.input.display(), e);
            std::process::exit(1);
        }
    };

    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("html"));

    if let Err(e) = fs::write(&output, &page.html) {
        eprintln!("Error writing {}: {}", output.display(), e);
        std::process::exit(1);
    }

    info!(title = %page.title, "wrote page");
    println!("Created {}", output.display());
}
