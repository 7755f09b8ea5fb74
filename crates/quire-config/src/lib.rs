//! Configuration management for Quire.
//!
//! Parses `quire.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `security.jwt_secret`
//! - `security.cookie.domain`
//! - `documentation[].token_secret`
//!
//! ## Global Secret
//!
//! The admin-token secret comes from `security.jwt_secret` or, when that is
//! unset, from the JSON file named by `security.secret_file`
//! (`{"JwtSecretKey": "..."}`).

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override data directory.
    pub data_path: Option<PathBuf>,
    /// Override log level.
    pub log_level: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quire.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Data directory (relative string from TOML).
    data: DataConfigRaw,
    /// Secrets, cookies and CORS.
    pub security: SecurityConfig,
    /// Background build configuration.
    pub build: BuildConfig,
    /// Admin SPA location (relative string from TOML).
    admin: AdminConfigRaw,
    /// Documentation entries seeding the in-memory registry.
    #[serde(rename = "documentation")]
    documentations: Vec<DocumentationConfigRaw>,

    /// Resolved data directory (set after loading).
    #[serde(skip)]
    pub data_resolved: DataConfig,
    /// Resolved admin SPA directory (set after loading).
    #[serde(skip)]
    pub admin_resolved: AdminConfig,
    /// Resolved documentation entries (set after loading).
    #[serde(skip)]
    pub documentations_resolved: Vec<DocumentationConfig>,
    /// Resolved global secret (set after loading).
    #[serde(skip)]
    global_secret: String,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Maximum request body size in megabytes.
    pub body_limit_mb: u64,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 2727,
            body_limit_mb: 50,
            log_level: "info".to_owned(),
        }
    }
}

/// Raw data configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DataConfigRaw {
    path: Option<String>,
}

/// Resolved data directory.
#[derive(Debug, Default)]
pub struct DataConfig {
    /// Root holding one project directory per documentation.
    pub path: PathBuf,
}

/// Security configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Inline global secret.
    pub jwt_secret: Option<String>,
    /// JSON file holding the global secret.
    pub secret_file: Option<String>,
    /// Token cookie attributes.
    pub cookie: CookieConfig,
    /// Cross-origin settings.
    pub cors: CorsConfig,
}

/// `SameSite` cookie attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SameSite {
    /// `SameSite=Lax`.
    #[default]
    Lax,
    /// `SameSite=Strict`.
    Strict,
    /// `SameSite=None`.
    None,
}

impl<'de> Deserialize<'de> for SameSite {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        match value.to_ascii_lowercase().as_str() {
            "lax" => Ok(Self::Lax),
            "strict" => Ok(Self::Strict),
            "none" => Ok(Self::None),
            _ => Err(serde::de::Error::custom(format!(
                "unknown SameSite value: {value:?}"
            ))),
        }
    }
}

/// Attributes of the admin and visitor token cookies.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CookieConfig {
    /// Cookie domain (omitted when empty).
    pub domain: String,
    /// Cookie path.
    pub path: String,
    /// Lifetime in days.
    pub age_days: u32,
    /// `Secure` attribute.
    pub secure: bool,
    /// `SameSite` attribute.
    pub same_site: SameSite,
    /// `HttpOnly` attribute.
    pub http_only: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            path: "/".to_owned(),
            age_days: 7,
            secure: false,
            same_site: SameSite::Lax,
            http_only: true,
        }
    }
}

/// Cross-origin resource sharing configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins (`*` for any).
    pub allowed_origins: Vec<String>,
    /// Allowed methods.
    pub allowed_methods: Vec<String>,
    /// Allowed request headers.
    pub allowed_headers: Vec<String>,
    /// Headers exposed to scripts.
    pub exposed_headers: Vec<String>,
    /// Whether credentials (cookies) may be sent.
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds (0 disables the header).
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| (*s).to_owned()).collect();
        Self {
            allowed_origins: owned(&["*"]),
            allowed_methods: owned(&["GET", "POST", "PUT", "DELETE", "OPTIONS"]),
            allowed_headers: owned(&["Accept", "Authorization", "Content-Type", "X-CSRF-Token"]),
            exposed_headers: owned(&["Link"]),
            allow_credentials: true,
            max_age_secs: 0,
        }
    }
}

/// Background build configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Seconds between build ticks.
    pub interval_secs: u64,
    /// Site generator command, run inside each documentation directory.
    pub command: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            command: vec!["npx".to_owned(), "rspress".to_owned(), "build".to_owned()],
        }
    }
}

/// Raw admin configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AdminConfigRaw {
    dir: Option<String>,
}

/// Resolved admin SPA configuration.
#[derive(Debug, Default)]
pub struct AdminConfig {
    /// Directory with the built admin SPA.
    pub dir: PathBuf,
}

/// Raw documentation entry as parsed from TOML.
#[derive(Debug, Deserialize)]
struct DocumentationConfigRaw {
    id: u32,
    base_url: String,
    path: String,
    #[serde(default)]
    require_auth: bool,
    #[serde(default)]
    token_secret: String,
}

/// Resolved documentation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentationConfig {
    /// Documentation ID.
    pub id: u32,
    /// URL prefix.
    pub base_url: String,
    /// Project directory (absolute or relative to the working directory).
    pub build_path: PathBuf,
    /// Whether viewing requires a token.
    pub require_auth: bool,
    /// Visitor token secret.
    pub token_secret: String,
}

/// Raw secret file layout.
#[derive(Deserialize)]
struct SecretFile {
    #[serde(rename = "JwtSecretKey")]
    jwt_secret_key: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Secret file parsing error.
    #[error("Secret file error: {0}")]
    SecretFile(#[from] serde_json::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`security.jwt_secret`").
        field: String,
        /// Error message (e.g., "${`QUIRE_JWT_SECRET`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quire.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The result is
    /// validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Process-wide secret for admin tokens.
    #[must_use]
    pub fn global_secret(&self) -> &str {
        &self.global_secret
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(data_path) = &settings.data_path {
            self.data_resolved.path.clone_from(data_path);
            self.documentations_resolved = self
                .documentations
                .iter()
                .map(|raw| resolve_documentation(raw, data_path))
                .collect();
        }
        if let Some(log_level) = &settings.log_level {
            self.server.log_level.clone_from(log_level);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfigRaw::default(),
            security: SecurityConfig::default(),
            build: BuildConfig::default(),
            admin: AdminConfigRaw::default(),
            documentations: Vec::new(),
            data_resolved: DataConfig {
                path: base.join("data"),
            },
            admin_resolved: AdminConfig {
                dir: base.join("web/build"),
            },
            documentations_resolved: Vec::new(),
            global_secret: String::new(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.resolve_secret(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_build()?;
        require_non_empty(&self.global_secret, "security.jwt_secret")?;
        self.validate_documentations()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }
        if self.server.body_limit_mb == 0 {
            return Err(ConfigError::Validation(
                "server.body_limit_mb cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate build configuration.
    fn validate_build(&self) -> Result<(), ConfigError> {
        if self.build.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "build.interval_secs must be greater than 0".to_owned(),
            ));
        }
        if self.build.command.first().is_none_or(String::is_empty) {
            return Err(ConfigError::Validation(
                "build.command cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate documentation entries.
    fn validate_documentations(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for doc in &self.documentations_resolved {
            if !seen.insert(doc.id) {
                return Err(ConfigError::Validation(format!(
                    "duplicate documentation id {}",
                    doc.id
                )));
            }
            if !doc.base_url.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "documentation {}: base_url must start with '/'",
                    doc.id
                )));
            }
            if doc.require_auth && doc.token_secret.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "documentation {}: token_secret cannot be empty when require_auth is set",
                    doc.id
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref secret) = self.security.jwt_secret {
            self.security.jwt_secret = Some(expand::expand_env(secret, "security.jwt_secret")?);
        }
        self.security.cookie.domain =
            expand::expand_env(&self.security.cookie.domain, "security.cookie.domain")?;

        for doc in &mut self.documentations {
            doc.token_secret = expand::expand_env(
                &doc.token_secret,
                &format!("documentation[{}].token_secret", doc.id),
            )?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.data_resolved = DataConfig {
            path: resolve(self.data.path.as_deref(), "data"),
        };
        self.admin_resolved = AdminConfig {
            dir: resolve(self.admin.dir.as_deref(), "web/build"),
        };
        self.documentations_resolved = self
            .documentations
            .iter()
            .map(|raw| resolve_documentation(raw, &self.data_resolved.path))
            .collect();
    }

    /// Load the global secret, preferring the inline value.
    fn resolve_secret(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        if let Some(secret) = &self.security.jwt_secret {
            self.global_secret.clone_from(secret);
        } else if let Some(file) = &self.security.secret_file {
            let content = std::fs::read_to_string(config_dir.join(file))?;
            let parsed: SecretFile = serde_json::from_str(&content)?;
            self.global_secret = parsed.jwt_secret_key;
        }
        Ok(())
    }
}

fn resolve_documentation(raw: &DocumentationConfigRaw, data_path: &Path) -> DocumentationConfig {
    DocumentationConfig {
        id: raw.id,
        base_url: raw.base_url.clone(),
        build_path: data_path.join(&raw.path),
        require_auth: raw.require_auth,
        token_secret: raw.token_secret.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 2727);
        assert_eq!(config.server.body_limit_mb, 50);
        assert_eq!(config.data_resolved.path, PathBuf::from("/test/data"));
        assert_eq!(config.admin_resolved.dir, PathBuf::from("/test/web/build"));
        assert_eq!(config.build.interval_secs, 10);
        assert_eq!(config.security.cookie.age_days, 7);
        assert!(config.security.cookie.http_only);
        assert_eq!(config.security.cookie.same_site, SameSite::Lax);
        assert!(config.documentations_resolved.is_empty());
    }

    #[test]
    fn test_default_config_requires_secret() {
        let config = Config::default_with_base(Path::new("/test"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("security.jwt_secret"));
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 2727);
    }

    #[test]
    fn test_parse_cookie_config() {
        let toml = r#"
[security.cookie]
domain = "example.com"
path = "/docs"
age_days = 3
secure = true
same_site = "Strict"
http_only = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let cookie = &config.security.cookie;
        assert_eq!(cookie.domain, "example.com");
        assert_eq!(cookie.path, "/docs");
        assert_eq!(cookie.age_days, 3);
        assert!(cookie.secure);
        assert_eq!(cookie.same_site, SameSite::Strict);
        assert!(!cookie.http_only);
    }

    #[test]
    fn test_same_site_is_case_insensitive() {
        for (raw, expected) in [
            ("lax", SameSite::Lax),
            ("LAX", SameSite::Lax),
            ("strict", SameSite::Strict),
            ("None", SameSite::None),
        ] {
            let toml = format!("[security.cookie]\nsame_site = \"{raw}\"\n");
            let config: Config = toml::from_str(&toml).unwrap();
            assert_eq!(config.security.cookie.same_site, expected, "input {raw}");
        }
    }

    #[test]
    fn test_unknown_same_site_rejected() {
        let toml = "[security.cookie]\nsame_site = \"sometimes\"\n";
        let err = toml::from_str::<Config>(toml).unwrap_err();
        assert!(err.to_string().contains("unknown SameSite value"));
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[data]
path = "var/data"

[admin]
dir = "admin/dist"

[[documentation]]
id = 42
base_url = "/docs/v1"
path = "docs-v1"
require_auth = true
token_secret = "S"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.data_resolved.path, PathBuf::from("/project/var/data"));
        assert_eq!(config.admin_resolved.dir, PathBuf::from("/project/admin/dist"));
        assert_eq!(
            config.documentations_resolved,
            vec![DocumentationConfig {
                id: 42,
                base_url: "/docs/v1".to_owned(),
                build_path: PathBuf::from("/project/var/data/docs-v1"),
                require_auth: true,
                token_secret: "S".to_owned(),
            }]
        );
    }

    #[test]
    fn test_load_from_file_with_secret_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("secret.json"), r#"{"JwtSecretKey": "from-file"}"#)
            .unwrap();
        let config_path = dir.path().join("quire.toml");
        std::fs::write(
            &config_path,
            "[security]\nsecret_file = \"secret.json\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(config.global_secret(), "from-file");
        assert_eq!(config.config_path, Some(config_path));
        assert_eq!(config.data_resolved.path, dir.path().join("data"));
    }

    #[test]
    fn test_inline_secret_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("quire.toml");
        std::fs::write(
            &config_path,
            "[security]\njwt_secret = \"inline\"\nsecret_file = \"missing.json\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(config.global_secret(), "inline");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/quire.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_duplicate_documentation_ids_rejected() {
        let toml = r#"
[security]
jwt_secret = "g"

[[documentation]]
id = 1
base_url = "/a"
path = "a"

[[documentation]]
id = 1
base_url = "/b"
path = "b"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        config.resolve_secret(Path::new("/project")).unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate documentation id 1"));
    }

    #[test]
    fn test_base_url_must_be_absolute() {
        let toml = r#"
[security]
jwt_secret = "g"

[[documentation]]
id = 1
base_url = "docs"
path = "a"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        config.resolve_secret(Path::new("/project")).unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url must start with '/'"));
    }

    #[test]
    fn test_protected_documentation_needs_secret() {
        let toml = r#"
[security]
jwt_secret = "g"

[[documentation]]
id = 5
base_url = "/private"
path = "private"
require_auth = true
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        config.resolve_secret(Path::new("/project")).unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("token_secret"));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.global_secret = "g".to_owned();
        config.build.interval_secs = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("build.interval_secs"));
    }

    #[test]
    fn test_empty_build_command_rejected() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.global_secret = "g".to_owned();
        config.build.command = Vec::new();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_apply_cli_settings_host_and_port() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9000),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.log_level, "info"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_data_path_moves_documentation() {
        let toml = r#"
[[documentation]]
id = 1
base_url = "/a"
path = "a"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        let overrides = CliSettings {
            data_path: Some(PathBuf::from("/srv/quire")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.data_resolved.path, PathBuf::from("/srv/quire"));
        assert_eq!(
            config.documentations_resolved[0].build_path,
            PathBuf::from("/srv/quire/a")
        );
    }

    #[test]
    fn test_cors_defaults() {
        let cors = CorsConfig::default();
        assert_eq!(cors.allowed_origins, vec!["*".to_owned()]);
        assert!(cors.allowed_methods.contains(&"OPTIONS".to_owned()));
        assert!(cors.allow_credentials);
    }
}
