//! Viewer configuration read from the process environment.
//!
//! # Responsibility
//! - Resolve private-post inclusion, served base path and site URL.
//! - Keep env parsing rules in one place for CLI and tests.
//!
//! # Invariants
//! - `base_path` is `/` or starts with `/` and has no trailing `/`.
//! - Private posts are included only for the exact value `true`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

pub const ENV_SHOW_PRIVATE_POSTS: &str = "SHOW_PRIVATE_POSTS";
pub const ENV_BASE_PATH: &str = "BASE_PATH";
pub const ENV_SITE_URL: &str = "SITE_URL";

/// Configuration load errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `SITE_URL` is set but not an absolute URL.
    InvalidSiteUrl { value: String, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSiteUrl { value, reason } => {
                write!(f, "invalid {ENV_SITE_URL} `{value}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved viewer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Show followers-only and direct posts too.
    pub include_private_posts: bool,
    /// Mount point for served asset URLs.
    pub base_path: String,
    pub site_url: Option<Url>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            include_private_posts: false,
            base_path: "/".to_string(),
            site_url: None,
        }
    }
}

impl ViewerConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    ///
    /// # Errors
    /// - Returns `InvalidSiteUrl` when `SITE_URL` does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let include_private_posts = lookup(ENV_SHOW_PRIVATE_POSTS).as_deref() == Some("true");
        let base_path = normalize_base_path(lookup(ENV_BASE_PATH).as_deref().unwrap_or(""));
        let site_url = match lookup(ENV_SITE_URL) {
            Some(value) if !value.trim().is_empty() => {
                let trimmed = value.trim();
                let parsed = Url::parse(trimmed).map_err(|err| ConfigError::InvalidSiteUrl {
                    value: trimmed.to_string(),
                    reason: err.to_string(),
                })?;
                Some(parsed)
            }
            _ => None,
        };

        Ok(Self {
            include_private_posts,
            base_path,
            site_url,
        })
    }
}

/// Normalizes a base path to `/` or `/segment[/segment...]`.
pub fn normalize_base_path(value: &str) -> String {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
