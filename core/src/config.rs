use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "termitask.toml";
pub const TOKEN_ENV_VAR: &str = "GITHUB_AUTH_TOKEN";
pub const DEFAULT_LIST_NAME: &str = "Regular Tasks";

const APP_DIR: &str = ".termitask";
const DEFAULT_DB_FILE: &str = "termitask.db";
const DEFAULT_LOG_FILE: &str = "exec.log";

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github_auth_token: Option<String>,
    pub repos: Vec<PathBuf>,
    pub db_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub list_name: Option<String>,
}

impl Config {
    /// Loads `path` when given, otherwise the first `termitask.toml` found in
    /// the working directory or `~/.termitask`. No file at all means defaults.
    /// `GITHUB_AUTH_TOKEN` overrides the token from the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match search_paths().into_iter().find(|p| p.is_file()) {
                Some(p) => Self::from_file(&p)?,
                None => Config::default(),
            },
        };
        config.apply_env(env::var(TOKEN_ENV_VAR).ok());
        Ok(config)
    }

    /// A non-blank token from the environment replaces the one from the file.
    pub fn apply_env(&mut self, token: Option<String>) {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.github_auth_token = Some(token);
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn require_token(&self) -> Result<&str> {
        match self.github_auth_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(anyhow!("{} not set", TOKEN_ENV_VAR)),
        }
    }

    pub fn list_name(&self) -> &str {
        self.list_name.as_deref().unwrap_or(DEFAULT_LIST_NAME)
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(p) => Ok(p.clone()),
            None => Ok(app_dir()?.join(DEFAULT_DB_FILE)),
        }
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(p) => Ok(p.clone()),
            None => Ok(app_dir()?.join(DEFAULT_LOG_FILE)),
        }
    }
}

fn app_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(APP_DIR))
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Ok(dir) = app_dir() {
        paths.push(dir.join(CONFIG_FILE_NAME));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let config = Config::parse(
            r#"
            github_auth_token = "abc"
            repos = ["/src/one", "/src/two"]
            db_path = "/tmp/t.db"
            list_name = "Chores"
            "#,
        )
        .unwrap();
        assert_eq!(config.require_token().unwrap(), "abc");
        assert_eq!(config.repos, vec![PathBuf::from("/src/one"), PathBuf::from("/src/two")]);
        assert_eq!(config.db_path().unwrap(), PathBuf::from("/tmp/t.db"));
        assert_eq!(config.list_name(), "Chores");
    }

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert!(config.repos.is_empty());
        assert_eq!(config.list_name(), DEFAULT_LIST_NAME);
        assert!(config.require_token().is_err());
    }

    #[test]
    fn test_blank_token_is_missing() {
        let config = Config::parse(r#"github_auth_token = "  ""#).unwrap();
        let err = config.require_token().unwrap_err();
        assert_eq!(err.to_string(), "GITHUB_AUTH_TOKEN not set");
    }

    #[test]
    fn test_env_token_overrides_file() {
        let mut config = Config::parse(r#"github_auth_token = "from-file""#).unwrap();
        config.apply_env(Some("from-env".to_string()));
        assert_eq!(config.require_token().unwrap(), "from-env");
    }

    #[test]
    fn test_blank_or_missing_env_token_keeps_file_value() {
        let mut config = Config::parse(r#"github_auth_token = "from-file""#).unwrap();
        config.apply_env(Some("   ".to_string()));
        assert_eq!(config.require_token().unwrap(), "from-file");
        config.apply_env(None);
        assert_eq!(config.require_token().unwrap(), "from-file");

        let mut empty = Config::default();
        empty.apply_env(Some(String::new()));
        assert!(empty.require_token().is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "repos = [").unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
