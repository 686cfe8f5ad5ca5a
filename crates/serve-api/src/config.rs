use std::{
    fs::read_to_string,
    path::{Component, Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::{
    cli::Args,
    error::{AppError, AppResult},
};

fn default_ip_address() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    3000
}

fn default_directory() -> PathBuf {
    PathBuf::from("./")
}

fn default_database() -> PathBuf {
    PathBuf::from("sqlite.db")
}

fn default_timeout_ms() -> u64 {
    30_000
}

/// Contents of the optional TOML config file. Anything left out falls back
/// to the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    #[serde(default)]
    pub(crate) ip_address: Option<String>,
    #[serde(default)]
    pub(crate) port: Option<u16>,
    #[serde(default)]
    pub(crate) directory: Option<PathBuf>,
    #[serde(default)]
    pub(crate) verbose: Option<bool>,
    #[serde(default)]
    pub(crate) database: Option<PathBuf>,
    #[serde(default)]
    pub(crate) timeout_ms: Option<u64>,
}

impl FileConfig {
    pub(crate) fn load(path: &Path) -> AppResult<Self> {
        let contents = read_to_string(path)
            .map_err(|e| AppError::Config(format!("reading {}: {e}", path.display())))?;
        toml::from_str(&contents)
            .map_err(|e| AppError::Config(format!("parsing {}: {e}", path.display())))
    }
}

/// Resolved settings. Command line and environment win over the config
/// file, which wins over the defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub ip_address: String,
    pub port: u16,
    pub directory: PathBuf,
    pub verbose: bool,
    pub database: PathBuf,
    pub timeout: Option<Duration>,
    pub source: Option<PathBuf>,
}

impl Config {
    pub fn load(args: &Args) -> AppResult<Self> {
        let (file, source) = match &args.config {
            Some(path) => (FileConfig::load(path)?, Some(path.clone())),
            None => match home_config_path().filter(|p| p.is_file()) {
                Some(path) => (FileConfig::load(&path)?, Some(path)),
                None => (FileConfig::default(), None),
            },
        };
        let mut config = Self::resolve(args, file);
        config.source = source;
        Ok(config)
    }

    pub(crate) fn resolve(args: &Args, file: FileConfig) -> Self {
        let directory = args
            .directory
            .clone()
            .or(file.directory)
            .filter(|d| !d.as_os_str().is_empty())
            .map(|d| clean_path(&d))
            .unwrap_or_else(default_directory);
        let timeout_ms = args
            .timeout_ms
            .or(file.timeout_ms)
            .unwrap_or_else(default_timeout_ms);

        Self {
            ip_address: args
                .ip_address
                .clone()
                .or(file.ip_address)
                .unwrap_or_else(default_ip_address),
            port: args.port.or(file.port).unwrap_or_else(default_port),
            directory,
            verbose: args.verbose.or(file.verbose).unwrap_or(false),
            database: args
                .database
                .clone()
                .or(file.database)
                .unwrap_or_else(default_database),
            timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
            source: None,
        }
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.ip_address, self.port)
    }

    pub fn log_summary(&self) {
        if let Some(path) = &self.source {
            tracing::info!("using config file: {}", path.display());
        }
        if self.verbose {
            tracing::info!("verbose=true");
            tracing::info!("port={}", self.port);
            tracing::info!("ip_address={}", self.ip_address);
            tracing::info!("directory={}", self.directory.display());
            tracing::info!("database={}", self.database.display());
            match self.timeout {
                Some(t) => tracing::info!("timeout_ms={}", t.as_millis()),
                None => tracing::info!("timeout_ms=0 (disabled)"),
            }
        }
    }
}

fn home_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".serve.toml"))
}

/// Resolve `.` and `..` lexically, without touching the filesystem. Leading
/// `..` segments of a relative path are kept.
pub(crate) fn clean_path(p: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for comp in p.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(comp.as_os_str()),
            Component::Normal(c) => out.push(c),
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Built directly rather than parsed, so SERVE_* variables in the test
    // environment cannot leak in.
    fn args() -> Args {
        Args {
            log_level: "info".into(),
            ..Args::default()
        }
    }

    #[test]
    fn defaults() {
        let config = Config::resolve(&args(), FileConfig::default());
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
        assert_eq!(config.directory, PathBuf::from("./"));
        assert_eq!(config.database, PathBuf::from("sqlite.db"));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(!config.verbose);
    }

    #[test]
    fn command_line_wins_over_file() {
        let file: FileConfig = toml::from_str(
            r#"
            port = 8080
            ip_address = "127.0.0.1"
            directory = "public"
            verbose = true
            "#,
        )
        .unwrap();
        let cli = Args {
            port: Some(9090),
            directory: Some(PathBuf::from("site")),
            ..args()
        };
        let config = Config::resolve(&cli, file);
        assert_eq!(config.port, 9090);
        assert_eq!(config.ip_address, "127.0.0.1");
        assert_eq!(config.directory, PathBuf::from("site"));
        assert!(config.verbose);
    }

    #[test]
    fn command_line_can_turn_verbose_off() {
        let file: FileConfig = toml::from_str("verbose = true").unwrap();
        let cli = Args {
            verbose: Some(false),
            ..args()
        };
        assert!(!Config::resolve(&cli, file).verbose);
    }

    #[test]
    fn zero_timeout_disables_it() {
        let cli = Args {
            timeout_ms: Some(0),
            ..args()
        };
        let config = Config::resolve(&cli, FileConfig::default());
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>("colour = \"blue\"").is_err());
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("serve.toml");
        std::fs::write(&path, "port = 4000\ndatabase = \"data/app.db\"\n").unwrap();

        let cli = Args {
            config: Some(path.clone()),
            ..args()
        };
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.database, PathBuf::from("data/app.db"));
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Args {
            config: Some(dir.path().join("nope.toml")),
            ..args()
        };
        let err = Config::load(&cli).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn cleans_directory_lexically() {
        assert_eq!(clean_path(Path::new("./a/b/../c/")), PathBuf::from("a/c"));
        assert_eq!(clean_path(Path::new("a/..")), PathBuf::from("."));
        assert_eq!(clean_path(Path::new("../x")), PathBuf::from("../x"));
        assert_eq!(clean_path(Path::new("/../srv")), PathBuf::from("/srv"));
    }
}
