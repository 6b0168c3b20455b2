use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::debug;

use textoc::Config;

#[derive(Parser)]
#[command(name = "textoc")]
#[command(about = "Render a Textile document to HTML with a linked table of contents")]
struct Cli {
    /// Input Textile file
    input: Option<PathBuf>,

    /// TOML file overriding the page settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = textoc::logging::init_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let Some(input) = cli.input else {
        println!("Oh no! You didn't give me a filename :(");
        process::exit(1);
    };

    let config = match cli.config {
        Some(path) => match Config::load(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        },
        None => Config::compiled_default(),
    };

    match textoc::generate_page_from_file(&input, &config) {
        Ok(page) => print!("{}", page),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
