use thiserror::Error;

// ─── Config errors ───────────────────────────────────────────────────────────

/// Why a configuration could not be loaded or is not usable for a run.
///
/// The store seam reports [`StoreError`]; orchestration code wraps both in
/// `anyhow::Result` for context chains.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required setting `{key}` is not set")]
    Missing { key: &'static str },

    #[error("`{value}` is neither a page id nor a page URL")]
    InvalidPageRef { value: String },

    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Store errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("authentication rejected ({status})")]
    Auth { status: u16 },

    #[error("object not found: {message}")]
    NotFound { message: String },

    #[error("rate-limited (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("batch of {len} blocks exceeds the per-request limit of {max}")]
    BatchTooLarge { len: usize, max: usize },

    #[error("transport: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}
