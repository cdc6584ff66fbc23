//! CLI command implementations.

pub mod auth;
pub mod bookings;
pub mod endpoint;
pub mod hotels;
pub mod rooms;

use std::sync::Arc;
use std::time::Duration;

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use sb_api::{ApiClient, ApiError};
use sb_core::config::AppConfig;
use sb_core::endpoint::EndpointResolver;
use sb_core::error::{SbError, SbResult};
use sb_models::{Database, Session, SqliteStore, TokenStore};
use sb_services::{Service, SessionService};

/// Everything a command needs to talk to the backend.
pub struct AppContext {
    pub config: AppConfig,
    pub session: SessionService,
}

impl AppContext {
    /// Open the token database, resolve the endpoint and restore any session.
    pub fn init(config: AppConfig) -> SbResult<Self> {
        let db = Database::init(&config.effective_db_path()?, &config.storage)?;
        let tokens = TokenStore::new(Arc::new(SqliteStore::new(db)));
        let endpoint = EndpointResolver::from_config(&config.api);
        let api = ApiClient::new(endpoint, tokens, config.api.build_mode)?;

        let mut session = SessionService::new(api);
        session.init()?;
        Ok(Self { config, session })
    }

    pub fn api(&self) -> &ApiClient {
        self.session.api()
    }

    /// Current session, or an error telling the user to sign in.
    pub fn require_session(&self) -> SbResult<Session> {
        self.session.current_session().ok_or_else(|| {
            SbError::MissingConfig("session. Run `staybook auth login` first".into())
        })
    }
}

/// Print a request failure and turn it into the process error.
pub fn fail(err: ApiError) -> SbError {
    eprintln!("  {} {}", style("ERROR").red().bold(), err);
    if let Some(fields) = err.fields() {
        for (field, message) in fields {
            eprintln!("    {}: {}", style(field).yellow(), message);
        }
    }
    if matches!(err, ApiError::Unauthorized(_)) {
        eprintln!("  Run `staybook auth login` to sign in again.");
    }
    SbError::Other(anyhow::Error::new(err))
}

/// Spinner shown while a request is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Table with the CLI's standard look.
pub fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Optional text cell, "-" when absent.
pub fn cell(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Format a price with thousands separators, e.g. 1250000 -> "1,250,000".
pub fn format_price(price: f64) -> String {
    let whole = price.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if whole < 0 {
        out.insert(0, '-');
    }
    out
}

/// Truncate a string to a maximum number of characters, appending an ellipsis if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}
