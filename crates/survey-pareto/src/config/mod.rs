use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_SHEET_RANGE: &str = "Respuestas!A:Z";

/// Deployment stage, read from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    #[default]
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub sheets: SheetsConfig,
}

impl AppConfig {
    /// Reads the process environment, after merging a local `.env` if present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: non_empty_var("APP_ENV")
                .map(|value| AppEnvironment::parse(&value))
                .unwrap_or_default(),
            server: ServerConfig::from_env()?,
            telemetry: TelemetryConfig {
                log_level: non_empty_var("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            },
            sheets: SheetsConfig::from_env(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    const DEFAULT_HOST: &'static str = "127.0.0.1";
    const DEFAULT_PORT: u16 = 3000;

    fn from_env() -> Result<Self, ConfigError> {
        let port = match non_empty_var("APP_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort)?,
            None => Self::DEFAULT_PORT,
        };

        Ok(Self {
            host: non_empty_var("APP_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            port,
        })
    }

    /// Resolves the bind address; `localhost` maps to the IPv4 loopback.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// `tracing` filter directive, e.g. `info` or `survey_pareto=debug`.
    pub log_level: String,
}

/// Location of the response spreadsheet and the service account allowed to read it.
#[derive(Debug, Clone, Default)]
pub struct SheetsConfig {
    pub spreadsheet_id: Option<String>,
    pub range: String,
    pub service_account_email: Option<String>,
    pub private_key: Option<String>,
}

impl SheetsConfig {
    fn from_env() -> Self {
        Self {
            spreadsheet_id: non_empty_var("GOOGLE_SHEET_ID"),
            range: non_empty_var("GOOGLE_SHEET_RANGE")
                .unwrap_or_else(|| DEFAULT_SHEET_RANGE.to_string()),
            service_account_email: non_empty_var("GOOGLE_SERVICE_ACCOUNT_EMAIL"),
            // Keys pasted into .env files usually carry escaped newlines.
            private_key: non_empty_var("GOOGLE_PRIVATE_KEY").map(|key| key.replace("\\n", "\n")),
        }
    }

    /// Everything needed to fetch the configured range, or the first missing piece.
    pub fn credentials(&self) -> Result<SheetCredentials, ConfigError> {
        let spreadsheet_id = self
            .spreadsheet_id
            .clone()
            .ok_or(ConfigError::MissingSheetId)?;

        match (&self.service_account_email, &self.private_key) {
            (Some(client_email), Some(private_key)) => Ok(SheetCredentials {
                spreadsheet_id,
                range: self.range.clone(),
                client_email: client_email.clone(),
                private_key: private_key.clone(),
            }),
            _ => Err(ConfigError::MissingCredentials),
        }
    }
}

#[derive(Clone)]
pub struct SheetCredentials {
    pub spreadsheet_id: String,
    pub range: String,
    pub client_email: String,
    pub private_key: String,
}

impl fmt::Debug for SheetCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetCredentials")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("range", &self.range)
            .field("client_email", &self.client_email)
            .finish_non_exhaustive()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingSheetId,
    MissingCredentials,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingSheetId => {
                write!(f, "GOOGLE_SHEET_ID is not set; no spreadsheet to analyze")
            }
            ConfigError::MissingCredentials => write!(
                f,
                "missing Google credentials: set GOOGLE_SERVICE_ACCOUNT_EMAIL and GOOGLE_PRIVATE_KEY"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::MissingSheetId
            | ConfigError::MissingCredentials => None,
        }
    }
}
