use std::env;
use std::net::SocketAddr;

/// Paths reachable without credentials unless `EXCLUDED_PATHS` overrides them.
pub const DEFAULT_EXCLUDED_PATHS: &str = "/api/v1/status/,/api/v1/unauthorized/,/api/v1/forbidden/,/api/v1/auth_session/login/,/api/v1/users/,/api/v1/reset_password/";

/// Which authentication strategy the server runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    None,
    Basic,
    Session,
}

impl AuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::None => "none",
            AuthType::Basic => "basic_auth",
            AuthType::Session => "session_auth",
        }
    }
}

impl std::fmt::Display for AuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AuthType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" | "auth" => Ok(AuthType::None),
            "basic_auth" => Ok(AuthType::Basic),
            "session_auth" => Ok(AuthType::Session),
            _ => Err(format!("Invalid auth type: {}", s)),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    // Server
    pub bind_addr: SocketAddr,

    // Authentication
    pub auth_type: AuthType,
    pub session_name: Option<String>,
    pub excluded_paths: Vec<String>,

    // Seeded account
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field("auth_type", &self.auth_type)
            .field("session_name", &self.session_name)
            .field("excluded_paths", &self.excluded_paths)
            .field("admin_email", &self.admin_email)
            .field(
                "admin_password",
                &self.admin_password.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Attempt to load .env file, but don't fail if it doesn't exist
        let _ = dotenvy::dotenv();

        // Server
        let bind_addr = parse_env_or_default("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 5000)))?;

        // Authentication
        let auth_type = parse_env_or_default("AUTH_TYPE", AuthType::None)?;

        let session_name = non_empty_var("SESSION_NAME");
        if let Some(name) = &session_name {
            if !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            {
                return Err(ConfigError::InvalidValue(
                    "SESSION_NAME".to_string(),
                    "may only contain alphanumeric characters, '-', '_' and '.'".to_string(),
                ));
            }
        }

        let excluded_paths_str =
            env::var("EXCLUDED_PATHS").unwrap_or_else(|_| DEFAULT_EXCLUDED_PATHS.to_string());
        let excluded_paths = parse_list(&excluded_paths_str);

        // Seeded account: both or neither
        let admin_email = non_empty_var("ADMIN_EMAIL");
        let admin_password = non_empty_var("ADMIN_PASSWORD");
        match (&admin_email, &admin_password) {
            (Some(_), None) => return Err(ConfigError::MissingVar("ADMIN_PASSWORD".to_string())),
            (None, Some(_)) => return Err(ConfigError::MissingVar("ADMIN_EMAIL".to_string())),
            _ => {}
        }

        Ok(Config {
            bind_addr,
            auth_type,
            session_name,
            excluded_paths,
            admin_email,
            admin_password,
        })
    }
}

/// Split a comma-separated list, dropping blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Helper function to parse environment variable with a default value
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| ConfigError::ParseError(key.to_string(), format!("{}: {}", e, val))),
        Err(_) => Ok(default),
    }
}
