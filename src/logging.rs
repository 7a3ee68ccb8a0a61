use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file path.
pub const LOG_ENV: &str = "CMDTREE_LOG";

/// Initialize tracing with optional file output.
///
/// Logging is disabled by default so completion output stays clean.
/// Set `CMDTREE_LOG` to a file path to enable it; `verbose` additionally
/// logs to stderr.
///
/// Log files are created with unique names to prevent conflicts when
/// several completions run at once: `{path}.{timestamp}.{pid}`
pub fn init_tracing(verbose: bool) {
    let log_path = std::env::var(LOG_ENV).ok();
    if log_path.is_none() && !verbose {
        return;
    }

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = log_path.and_then(|path| {
        let unique_path = unique_log_path(&path);
        match std::fs::File::create(&unique_path) {
            Ok(file) => Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_level(true),
            ),
            Err(_) => {
                eprintln!("Warning: Failed to create log file: {}", unique_path);
                None
            }
        }
    });

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
}

fn unique_log_path(path: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", path, timestamp, pid)
}
