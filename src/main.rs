use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use vue_html_bridge::config::{BridgeOptions, FormatOptions};
use vue_html_bridge::discovery::{bridge_dir, bridge_file};
use vue_html_bridge::logging::{setup_logging, LogFormat};
use vue_html_bridge::BridgeOutput;

/// Print every statically reachable HTML rendering of Vue single-file components as JSON
#[derive(Parser, Debug)]
#[command(name = "vue-html-bridge", version)]
struct Cli {
    /// `.vue` files or directories to scan for them
    #[arg(required = true, num_args = 1..)]
    paths: Vec<PathBuf>,

    /// Emit rendered HTML exactly as rendered, on one line
    #[arg(long, default_value_t = false)]
    no_format: bool,

    /// Line width the formatter breaks at
    #[arg(long, default_value_t = 80)]
    print_width: usize,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<tracing::Level>,

    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

impl Cli {
    fn options(&self) -> BridgeOptions {
        BridgeOptions {
            format: FormatOptions {
                enabled: !self.no_format,
                print_width: self.print_width,
                ..FormatOptions::default()
            },
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let options = cli.options();

    if let [path] = cli.paths.as_slice() {
        if path.is_file() {
            return Ok(serde_json::to_string_pretty(&bridge_file(path, &options)?)?);
        }
    }

    let mut all: BTreeMap<String, Vec<BridgeOutput>> = BTreeMap::new();
    for path in &cli.paths {
        if path.is_dir() {
            all.extend(bridge_dir(path, &options)?);
        } else {
            all.insert(
                path.to_string_lossy().into_owned(),
                bridge_file(path, &options)?,
            );
        }
    }
    Ok(serde_json::to_string_pretty(&all)?)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = setup_logging(cli.log_level, cli.log_format) {
        eprintln!("failed to set up logging: {err:#}");
    }

    match run(&cli) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
