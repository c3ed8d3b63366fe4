use std::time::Duration;

/// Banda Aceh, used when neither coordinates nor a city are available.
pub const FALLBACK_LAT: f64 = 5.5483;
pub const FALLBACK_LON: f64 = 95.3238;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: String,
    pub default_city: Option<String>,
    pub default_lat: f64,
    pub default_lon: f64,
    pub weather_timeout: Duration,
    pub search_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            openweather_api_key: None,
            openweather_base_url: DEFAULT_BASE_URL.to_string(),
            default_city: None,
            default_lat: FALLBACK_LAT,
            default_lon: FALLBACK_LON,
            weather_timeout: Duration::from_secs(5),
            search_timeout: Duration::from_secs(3),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            openweather_api_key: std::env::var("OPENWEATHER_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            openweather_base_url: std::env::var("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            default_city: std::env::var("DEFAULT_CITY")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            default_lat: parse_coordinate("DEFAULT_LAT", FALLBACK_LAT, 90.0)?,
            default_lon: parse_coordinate("DEFAULT_LON", FALLBACK_LON, 180.0)?,
            weather_timeout: parse_secs("WEATHER_TIMEOUT_SECS", 5)?,
            search_timeout: parse_secs("SEARCH_TIMEOUT_SECS", 3)?,
        };

        if !config.openweather_base_url.starts_with("http://")
            && !config.openweather_base_url.starts_with("https://")
        {
            anyhow::bail!("OPENWEATHER_BASE_URL must start with http:// or https://");
        }

        // Never log the key itself
        match &config.openweather_api_key {
            Some(key) => tracing::info!("OpenWeather API key set ({} characters)", key.len()),
            None => tracing::warn!(
                "OPENWEATHER_API_KEY not set; weather endpoints will answer 'API key not configured'"
            ),
        }
        tracing::debug!("OpenWeather Base URL: {}", config.openweather_base_url);
        if let Some(ref city) = config.default_city {
            tracing::debug!("Default city: {}", city);
        }
        tracing::debug!(
            "Default coordinates: {}, {}",
            config.default_lat,
            config.default_lon
        );
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    pub fn has_api_key(&self) -> bool {
        self.openweather_api_key.is_some()
    }
}

fn parse_coordinate(var: &str, default: f64, limit: f64) -> anyhow::Result<f64> {
    let value = match std::env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| anyhow::anyhow!("{} must be a decimal number", var))?,
        _ => return Ok(default),
    };
    if !value.is_finite() || value.abs() > limit {
        anyhow::bail!("{} must be between -{} and {}", var, limit, limit);
    }
    Ok(value)
}

fn parse_secs(var: &str, default: u64) -> anyhow::Result<Duration> {
    match std::env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("{} must be a whole number of seconds", var))?;
            if secs == 0 {
                anyhow::bail!("{} cannot be zero", var);
            }
            Ok(Duration::from_secs(secs))
        }
        _ => Ok(Duration::from_secs(default)),
    }
}
