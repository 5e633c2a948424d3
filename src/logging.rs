//! Subscriber setup for the command line tool.
//!
//! Logs always go to stderr so stdout stays valid JSON.

use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum LogFormat {
    Json,
    PrettyCompact,
    Pretty,
}

/// Installs the global subscriber. `RUST_LOG` overrides `log_level` when it
/// parses; an invalid `RUST_LOG` falls back to the default filter.
pub fn setup_logging(
    log_level: Option<tracing::Level>,
    log_format: Option<LogFormat>,
) -> anyhow::Result<LogFormat> {
    let default_log_level = log_level.unwrap_or(tracing::Level::WARN);
    let default_env_filter = tracing_subscriber::filter::EnvFilter::builder()
        .with_default_directive(default_log_level.into())
        .parse(default_log_level.to_string().to_ascii_lowercase())?;

    let env_filter = match std::env::var("RUST_LOG").ok() {
        Some(directive) => match tracing_subscriber::filter::EnvFilter::builder().parse(&directive) {
            Ok(env_filter) => env_filter,
            Err(err) => {
                eprintln!("invalid log filter: {err}");
                eprintln!("falling back to default logging");
                default_env_filter
            }
        },
        None => default_env_filter,
    };

    let log_format = log_format.unwrap_or(LogFormat::PrettyCompact);
    let use_color = std::io::IsTerminal::is_terminal(&std::io::stderr());

    let fmt_layer_pretty = tracing_subscriber::fmt::Layer::new()
        .pretty()
        .without_time()
        .with_ansi(use_color)
        .with_writer(std::io::stderr);
    let fmt_layer_pretty_compact = tracing_subscriber::fmt::Layer::new()
        .compact()
        .without_time()
        .with_ansi(use_color)
        .with_writer(std::io::stderr);
    let fmt_layer_json = tracing_subscriber::fmt::Layer::new()
        .json()
        .without_time()
        .with_writer(std::io::stderr);

    let subscriber = tracing_subscriber::registry()
        .with((log_format == LogFormat::Json).then_some(fmt_layer_json))
        .with((log_format == LogFormat::PrettyCompact).then_some(fmt_layer_pretty_compact))
        .with((log_format == LogFormat::Pretty).then_some(fmt_layer_pretty))
        .with(env_filter);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(log_format)
}
