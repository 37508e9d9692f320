/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Selects the native output format (`json` or `pretty`).
pub const FORMAT_ENV: &str = "MEDITRACK_LOG_FORMAT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" | "text" => Some(Self::Pretty),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub default_filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_format_var(std::env::var(FORMAT_ENV).ok().as_deref())
    }

    fn from_format_var(format: Option<&str>) -> Self {
        Self {
            format: format.and_then(LogFormat::parse).unwrap_or_default(),
            ..Self::default()
        }
    }
}
