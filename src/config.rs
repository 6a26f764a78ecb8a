/// Location stored when neither the submission nor the form variant names one.
pub const DEFAULT_LOCATION: &str = "General";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Third-party form endpoint that receives a copy of inquiry submissions.
    pub lead_forward_url: Option<String>,
    pub lead_forward_timeout_secs: u64,
    pub default_location: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `from_env` is a thin wrapper over this; tests pass a map instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            database_url: lookup("DB_URL")
                .or_else(|| lookup("DATABASE_URL"))
                .ok_or_else(|| {
                    anyhow::anyhow!("DB_URL or DATABASE_URL environment variable required")
                })
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DB_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DB_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            db_acquire_timeout_secs: parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5)?,
            lead_forward_url: lookup("LEAD_FORWARD_URL")
                .filter(|s| !s.trim().is_empty())
                .map(|raw| {
                    let parsed = url::Url::parse(raw.trim()).map_err(|e| {
                        anyhow::anyhow!("LEAD_FORWARD_URL is not a valid URL: {}", e)
                    })?;
                    if parsed.scheme() != "http" && parsed.scheme() != "https" {
                        anyhow::bail!("LEAD_FORWARD_URL must start with http:// or https://");
                    }
                    Ok(parsed.to_string())
                })
                .transpose()?,
            lead_forward_timeout_secs: parse_or(&lookup, "LEAD_FORWARD_TIMEOUT_SECS", 10)?,
            default_location: lookup("DEFAULT_LOCATION")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        };

        // Log successful configuration load (without sensitive values)
        tracing::debug!("Database host: {}", database_host(&config.database_url));
        match config.lead_forward_url {
            Some(ref url) => tracing::info!("Lead forwarding enabled: {}", url),
            None => tracing::warn!("LEAD_FORWARD_URL not set, lead forwarding disabled"),
        }
        tracing::debug!("Default location: {}", config.default_location);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// Host part of a database URL, for logging. Never includes credentials.
fn database_host(database_url: &str) -> String {
    url::Url::parse(database_url)
        .ok()
        .and_then(|u| u.host_str().filter(|h| !h.is_empty()).map(str::to_string))
        .unwrap_or_else(|| "<unparsed>".to_string())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a positive number", key)),
        _ => Ok(default),
    }
}
