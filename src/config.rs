//! Loading of the server configuration and the users file.
//!
//! Both files are line oriented UTF-8 text: blank lines and lines starting
//! with `#` are ignored, everything else is split on the first run of
//! whitespace. In the configuration file that yields `<key> <value>`
//! pairs; in the users file `<login> <password>` credentials.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "./config";
const DEFAULT_USERS_FILE: &str = "./users";
const DEFAULT_LOG_FILE: &str = "./log";
const DEFAULT_ROOT_DIR: &str = "/var/lib/ftp";
const DEFAULT_PORT: u16 = 21;

/// The error returned when the configuration cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unknown configuration key `{0}`")]
    UnknownKey(String),
    #[error("invalid value `{value}` for key `{key}`")]
    InvalidValue { key: String, value: String },
    #[error("root directory {path} is not usable")]
    RootDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Server configuration, immutable once loaded.
#[derive(Debug, Clone)]
pub struct Config {
    /// The directory served to clients; canonicalised and absolute. All
    /// client paths resolve beneath it.
    pub root_dir: PathBuf,
    /// TCP port of the control listener.
    pub port: u16,
    /// Maximum number of concurrent sessions; `0` means unlimited.
    pub max_clients: usize,
    /// Where the users file was read from.
    pub users_file: PathBuf,
    /// The append-only text log.
    pub log_file: PathBuf,
    /// `(login, password)` credentials from the users file. On duplicate
    /// logins the first entry wins.
    pub users: HashMap<String, String>,
}

impl Config {
    /// Loads the configuration from `path`, then the users file it points
    /// at. A missing or unreadable users file simply yields no users;
    /// anonymous logins still work.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let mut config = Config {
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
            port: DEFAULT_PORT,
            max_clients: 0,
            users_file: PathBuf::from(DEFAULT_USERS_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            users: HashMap::new(),
        };

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        for (key, value) in config_lines(&text) {
            config.apply(key, value)?;
        }

        config.root_dir = fs::canonicalize(&config.root_dir).map_err(|source| ConfigError::RootDir {
            path: config.root_dir.clone(),
            source,
        })?;
        // These only need to be absolute for log readability; missing
        // files stay as given and get created later or ignored.
        config.users_file = fs::canonicalize(&config.users_file).unwrap_or(config.users_file);
        config.log_file = fs::canonicalize(&config.log_file).unwrap_or(config.log_file);

        if let Ok(text) = fs::read_to_string(&config.users_file) {
            config.users = parse_users(&text);
        }

        Ok(config)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "root-directory" => self.root_dir = PathBuf::from(value),
            "port" => {
                self.port = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })?
            }
            "max-clients" => {
                self.max_clients = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })?
            }
            "users-file" => self.users_file = PathBuf::from(value),
            "log-file" => self.log_file = PathBuf::from(value),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

/// Yields the `(first-word, rest)` pairs of the meaningful lines.
/// Lines without a second field are skipped, like comments and blanks.
fn config_lines(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (key, value) = line.split_at(line.find(char::is_whitespace)?);
            Some((key, value.trim_start()))
        })
        .filter(|(_, value)| !value.is_empty())
}

fn parse_users(text: &str) -> HashMap<String, String> {
    let mut users = HashMap::new();
    for (login, password) in config_lines(text) {
        users.entry(login.to_string()).or_insert_with(|| password.to_string());
    }
    users
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_defaults_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();
        let cfg_path = write_file(
            dir.path(),
            "config",
            &format!("root-directory {}\n", root.display()),
        );

        let config = Config::load(&cfg_path).unwrap();
        assert_eq!(config.port, 21);
        assert_eq!(config.max_clients, 0);
        assert_eq!(config.log_file, PathBuf::from("./log"));
        assert!(config.users.is_empty());
    }

    #[test]
    fn parses_all_keys_and_users() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();
        let users_path = write_file(
            dir.path(),
            "users",
            "# credentials\nalice secret\nbob hunter2\nmalformed-line\nalice other\n",
        );
        let cfg_path = write_file(
            dir.path(),
            "config",
            &format!(
                "# server config\n\nroot-directory {}\nport 2121\nmax-clients 7\nusers-file {}\n",
                root.display(),
                users_path.display()
            ),
        );

        let config = Config::load(&cfg_path).unwrap();
        assert_eq!(config.port, 2121);
        assert_eq!(config.max_clients, 7);
        assert_eq!(config.root_dir, root.canonicalize().unwrap());
        assert_eq!(config.users.len(), 2);
        // First entry wins on duplicate logins, malformed lines are skipped.
        assert_eq!(config.users["alice"], "secret");
        assert_eq!(config.users["bob"], "hunter2");
    }

    #[test]
    fn unknown_key_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = write_file(dir.path(), "config", "colour-scheme mauve\n");
        match Config::load(&cfg_path) {
            Err(ConfigError::UnknownKey(key)) => assert_eq!(key, "colour-scheme"),
            other => panic!("expected UnknownKey, got {:?}", other),
        }
    }

    #[test]
    fn invalid_port_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = write_file(dir.path(), "config", "port seventeen\n");
        assert!(matches!(
            Config::load(&cfg_path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn nonexistent_root_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = write_file(dir.path(), "config", "root-directory /does/not/exist\n");
        assert!(matches!(Config::load(&cfg_path), Err(ConfigError::RootDir { .. })));
    }
}
