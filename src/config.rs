//! Process configuration.
//!
//! Two environment-derived values, read once at startup into an immutable
//! [`Config`] that handlers capture. Nothing here is re-read per request.
//! The optional `.env` merge happens in `main`, before this module runs.

use std::env;

use tracing::warn;

/// Greeting name used when `NAME` is unset or empty.
pub const DEFAULT_NAME: &str = "World";

/// Listening port used when `PORT` is unset or not a valid port number.
pub const DEFAULT_PORT: u16 = 3000;

/// Process-wide configuration, immutable after startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Who the root route greets (`NAME`). An empty value counts as unset.
    pub name: String,
    /// Port the server listens on (`PORT`).
    pub port: u16,
}

impl Config {
    /// Reads `NAME` and `PORT` from the process environment.
    ///
    /// A `PORT` that does not parse as a port number falls back to
    /// [`DEFAULT_PORT`] with a warning rather than failing startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let name = get("NAME")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_owned());

        let port = match get("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "PORT is not a valid port number, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
        };

        Self { name, port }
    }
}
