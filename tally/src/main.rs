use anyhow::{Context as _, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tally::errors::display_user_error;
use tally::{Cli, environment, run, terminal};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "tally=debug,tally_core=debug";

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_path = match init_tracing(cli.debug_log.clone()) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("Failed to initialize tracing: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    // パニック時に端末を元に戻してからログを残す
    setup_panic_handler(log_path);

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("Failed to start runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:?}");
            display_user_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path,
        None => environment::get_state_file("debug.log")?,
    };
    let log_file = std::sync::Arc::new(
        std::fs::File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?,
    );
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .init();
    Ok(path)
}

fn setup_panic_handler(log_path: PathBuf) {
    std::panic::set_hook(Box::new(move |panic_info| {
        terminal::restore_terminal();

        let payload = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic payload".to_string()
        };

        let location = if let Some(location) = panic_info.location() {
            format!(
                "{}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            )
        } else {
            "Unknown location".to_string()
        };

        let backtrace = std::backtrace::Backtrace::capture();
        let backtrace_str = match backtrace.status() {
            std::backtrace::BacktraceStatus::Captured => format!("\nBacktrace:\n{}", backtrace),
            std::backtrace::BacktraceStatus::Disabled => {
                "\nBacktrace: disabled (set RUST_BACKTRACE=1 to enable)".to_string()
            }
            _ => "\nBacktrace: unsupported".to_string(),
        };

        let timestamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f");
        let panic_log = format!(
            "\n=== PANIC OCCURRED ===\n\
            Timestamp: {}\n\
            Location: {}\n\
            Message: {}{}\n\
            ======================\n",
            timestamp, location, payload, backtrace_str
        );

        append_to(&log_path, &panic_log);
        tracing::error!("PANIC OCCURRED: {} at {}", payload, location);

        eprintln!("\n=== tally PANIC ===");
        eprintln!("Message: {}", payload);
        eprintln!("Location: {}", location);
        eprintln!("See {} for details", log_path.display());
    }));
}

fn append_to(path: &Path, text: &str) {
    use std::io::Write;
    if let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        let _ = writeln!(file, "{}", text);
        let _ = file.flush();
    }
}
