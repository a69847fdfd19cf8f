use thiserror::Error;

/// Failures of the terminal front end. The counting engine itself never fails.
#[derive(Error, Debug)]
pub enum TallyError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: String,
        source: toml::de::Error,
    },
}

/// Print an error in a short, user-facing form.
pub fn display_user_error(err: &anyhow::Error) {
    eprintln!("tally: {:#}", err);
}
