use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Upper bound for a single request, storage calls included.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(4),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite://services.db?mode=rwc";

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_request_timeout() -> u64 { 30 }
fn default_max_connections() -> u32 { 5 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Load `CONFIG_PATH` (default `config.toml`), or defaults when that file is absent.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_or_default(&path)
}

pub fn load_or_default(path: &str) -> Result<AppConfig> {
    if std::path::Path::new(path).exists() {
        load_from_file(path)
    } else {
        Ok(AppConfig::default())
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// [`load_default`], then env overrides and validation.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            if !host.trim().is_empty() {
                self.host = host;
            }
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("server.request_timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                self.url = url;
            }
        }
        if self.url.trim().is_empty() {
            self.url = DEFAULT_DATABASE_URL.to_string();
        }
        // every pooled connection to `:memory:` would otherwise see its own empty database
        if self.is_in_memory() {
            self.max_connections = 1;
            self.min_connections = 1;
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    /// Filesystem path of the database file, if the url names one.
    pub fn sqlite_path(&self) -> Option<&str> {
        if self.is_in_memory() {
            return None;
        }
        let rest = self.url.strip_prefix("sqlite://").or_else(|| self.url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or_default();
        if path.is_empty() { None } else { Some(path) }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        if !self.url.to_lowercase().starts_with("sqlite:") {
            return Err(anyhow!("database.url must start with sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}
