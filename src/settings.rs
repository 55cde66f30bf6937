use chrono::Weekday;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const DEFAULT_CONFIG_FILE: &str = "seminarplan.toml";

/// Deployment-level settings. Nothing in the library reads these globally;
/// callers pass the relevant values down explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Holiday region: `DE` or a German federal-state code.
    pub region: String,
    pub locale: Locale,
    pub semester_file: PathBuf,
    pub log_level: String,
    pub http_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            region: "NW".to_string(),
            locale: Locale::De,
            semester_file: PathBuf::from("data/semester_dates.json"),
            log_level: "error".to_string(),
            http_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

impl Settings {
    /// Defaults, then `seminarplan.toml` (or `path`) when present, then
    /// `SEMINARPLAN_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        Config::builder()
            .set_default("region", defaults.region)?
            .set_default("locale", defaults.locale.tag())?
            .set_default("semester_file", defaults.semester_file.to_string_lossy().into_owned())?
            .set_default("log_level", defaults.log_level)?
            .set_default("http_addr", defaults.http_addr)?
            .add_source(file)
            .add_source(Environment::with_prefix("SEMINARPLAN").try_parsing(false))
            .build()?
            .try_deserialize::<Settings>()
    }
}

/// Display language for headers and weekday names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
    De,
    En,
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::De => "de-DE",
            Locale::En => "en-US",
        }
    }

    pub fn date_header(&self) -> &'static str {
        match self {
            Locale::De => "Datum",
            Locale::En => "Date",
        }
    }

    pub fn topic_header(&self) -> &'static str {
        match self {
            Locale::De => "Thema",
            Locale::En => "Topic",
        }
    }

    pub fn weekday_name(&self, weekday: Weekday) -> &'static str {
        match (self, weekday) {
            (Locale::De, Weekday::Mon) => "Montag",
            (Locale::De, Weekday::Tue) => "Dienstag",
            (Locale::De, Weekday::Wed) => "Mittwoch",
            (Locale::De, Weekday::Thu) => "Donnerstag",
            (Locale::De, Weekday::Fri) => "Freitag",
            (Locale::De, Weekday::Sat) => "Samstag",
            (Locale::De, Weekday::Sun) => "Sonntag",
            (Locale::En, Weekday::Mon) => "Monday",
            (Locale::En, Weekday::Tue) => "Tuesday",
            (Locale::En, Weekday::Wed) => "Wednesday",
            (Locale::En, Weekday::Thu) => "Thursday",
            (Locale::En, Weekday::Fri) => "Friday",
            (Locale::En, Weekday::Sat) => "Saturday",
            (Locale::En, Weekday::Sun) => "Sunday",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLocale(pub String);

impl fmt::Display for UnknownLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported locale '{}' (expected de or en)", self.0)
    }
}

impl std::error::Error for UnknownLocale {}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "de" => Ok(Locale::De),
            "en" => Ok(Locale::En),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = UnknownLocale;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.tag().to_string()
    }
}
