use std::path::PathBuf;
use std::str::FromStr;

use crate::background::backup::BackupConfig;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines (default).
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected 'text' or 'json')")),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background tasks, in seconds (default: `5`).
    pub shutdown_timeout_secs: u64,
    /// SQLite connection string.
    pub database_url: String,
    /// Directory export files are written to (default: `exports`).
    pub export_dir: PathBuf,
    /// Daily storage-file backup settings.
    pub backup: BackupConfig,
    /// Tracing output format (default: text).
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                              |
    /// |------------------------|--------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                            |
    /// | `PORT`                 | `8000`                               |
    /// | `CORS_ORIGINS`         | `*`                                  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                 |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `5`                                  |
    /// | `DATABASE_FILE`        | `qa.db`                              |
    /// | `DATABASE_URL`         | `sqlite://<DATABASE_FILE>?mode=rwc`  |
    /// | `EXPORT_DIR`           | `exports`                            |
    /// | `LOG_FORMAT`           | `text`                               |
    ///
    /// The backup source is the file `DATABASE_URL` points at. Other backup
    /// settings are documented on [`BackupConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_parse("PORT", 8000);

        let cors_origins = parse_cors_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".into()),
        );

        let request_timeout_secs: u64 = env_parse("REQUEST_TIMEOUT_SECS", 30);
        let shutdown_timeout_secs: u64 = env_parse("SHUTDOWN_TIMEOUT_SECS", 5);

        let database_file = PathBuf::from(
            std::env::var("DATABASE_FILE").unwrap_or_else(|_| "qa.db".into()),
        );
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| format!("sqlite://{}?mode=rwc", database_file.display()));

        let export_dir =
            PathBuf::from(std::env::var("EXPORT_DIR").unwrap_or_else(|_| "exports".into()));

        let log_format: LogFormat = std::env::var("LOG_FORMAT")
            .unwrap_or_default()
            .parse()
            .unwrap_or_else(|e| panic!("LOG_FORMAT: {e}"));

        let backup_source = qabank_db::database_file(&database_url)
            .unwrap_or_else(|e| panic!("DATABASE_URL is not a valid SQLite URL: {e}"));
        let backup = BackupConfig::from_env(backup_source);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url,
            export_dir,
            backup,
            log_format,
        }
    }

    /// Whether CORS is configured to accept any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Read and parse an environment variable, falling back to `default` when
/// unset. Panics on a value that does not parse: misconfiguration should
/// fail at startup.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_origins_are_trimmed_and_blanks_dropped() {
        assert_eq!(
            parse_cors_origins(" http://a.test , ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn log_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn backup_source_follows_database_url() {
        std::env::set_var("DATABASE_URL", "sqlite://data/custom.db?mode=rwc");
        let config = ServerConfig::from_env();
        std::env::remove_var("DATABASE_URL");

        assert_eq!(config.database_url, "sqlite://data/custom.db?mode=rwc");
        assert_eq!(config.backup.source_path, PathBuf::from("data/custom.db"));
    }

    #[test]
    fn env_parse_falls_back_when_unset() {
        let value: u64 = env_parse("QABANK_TEST_SURELY_UNSET_VARIABLE", 17);
        assert_eq!(value, 17);
    }
}
