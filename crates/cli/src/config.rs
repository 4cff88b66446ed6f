// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `itconfig` discovery and parsing.
//!
//! The file holds `key=value` lines and is found by walking up from the
//! current directory. Supported keys:
//! - `db`: database path, relative paths resolved against the file's directory
//! - `project`: default 3-character project prefix

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use it_core::id::is_valid_prefix;

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "itconfig";
/// Environment variable consulted when neither flag nor config names a database.
pub const DB_PATH_ENV: &str = "IT_DB_PATH";
const DEFAULT_DB_DIR: &str = ".it";
const DEFAULT_DB_FILE: &str = "issues.db";

/// Settings read from an `itconfig` file. Empty when no file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Location of the file these settings came from.
    pub path: Option<PathBuf>,
    pub db: Option<PathBuf>,
    pub project: Option<String>,
}

impl Config {
    /// Find and load the nearest `itconfig` at or above `start`.
    pub fn discover(start: &Path) -> Result<Config> {
        match find_config(start)? {
            Some(path) => {
                tracing::debug!("using config {}", path.display());
                Config::load(&path)
            }
            None => Ok(Config::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        Config::parse(path, &content)
    }

    /// Parse `content` as if read from `path`.
    pub fn parse(path: &Path, content: &str) -> Result<Config> {
        let invalid = |line: usize, reason: String| Error::Config {
            path: path.to_path_buf(),
            line,
            reason,
        };
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let mut config = Config {
            path: Some(path.to_path_buf()),
            ..Config::default()
        };

        for (index, raw) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(invalid(line_no, "expected key=value".to_string()));
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "db" => {
                    if value.is_empty() {
                        return Err(invalid(line_no, "db cannot be empty".to_string()));
                    }
                    let db = Path::new(value);
                    config.db = Some(if db.is_absolute() {
                        db.to_path_buf()
                    } else {
                        normalize_lexically(&base.join(db))
                    });
                }
                "project" => {
                    let project = value.to_lowercase();
                    if !is_valid_prefix(&project) {
                        return Err(invalid(
                            line_no,
                            "project must be 3 lowercase alphanumeric chars".to_string(),
                        ));
                    }
                    config.project = Some(project);
                }
                other => {
                    return Err(invalid(line_no, format!("unsupported key '{other}'")));
                }
            }
        }

        Ok(config)
    }

    /// Resolve the database path.
    ///
    /// Precedence: `flag`, then the config `db`, then `env`
    /// (the value of `IT_DB_PATH`), then `.it/issues.db`.
    pub fn db_path(&self, flag: Option<&Path>, env: Option<&str>) -> PathBuf {
        if let Some(flag) = flag.filter(|p| !p.as_os_str().is_empty()) {
            return flag.to_path_buf();
        }
        if let Some(db) = &self.db {
            return db.clone();
        }
        if let Some(env) = env.map(str::trim).filter(|e| !e.is_empty()) {
            return PathBuf::from(env);
        }
        Path::new(DEFAULT_DB_DIR).join(DEFAULT_DB_FILE)
    }

    /// The project to act on: a non-blank `flag`, otherwise the config default.
    pub fn project<'a>(&'a self, flag: Option<&'a str>) -> Option<&'a str> {
        flag.map(str::trim)
            .filter(|p| !p.is_empty())
            .or(self.project.as_deref())
    }
}

/// Walk up from `start` looking for a regular file named `itconfig`.
pub fn find_config(start: &Path) -> Result<Option<PathBuf>> {
    for dir in start.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        match fs::metadata(&candidate) {
            Ok(meta) if meta.is_file() => return Ok(Some(candidate)),
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(None)
}

/// Collapse `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
