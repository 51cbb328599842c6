//! GDAL S-57 driver configuration.
//!
//! The S-57 driver reads its open options from the `OGR_S57_OPTIONS` configuration key as a
//! comma separated list of `KEY:VALUE` (or `KEY=VALUE`) pairs. [`S57Options`] is the typed
//! form of that list.
//!
//! # Examples
//!
//! ```
//! use s57tiler_core::options::{S57Options, Toggle};
//!
//! let options = S57Options::default();
//! assert_eq!(
//!     options.to_option_string(),
//!     "LNAM_REFS:ON,UPDATES:ON,SPLIT_MULTIPOINT:ON,PRESERVE_EMPTY_NUMBERS:ON,RETURN_LINKAGES:ON"
//! );
//!
//! let parsed: S57Options = "UPDATES=OFF,ADD_SOUNDG_DEPTH:ON".parse().unwrap();
//! assert_eq!(parsed.updates, Toggle::Off);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, S57Error};

/// Configuration key consulted by the GDAL S-57 driver.
pub const S57_OPTIONS_KEY: &str = "OGR_S57_OPTIONS";

/// On/off state of a single driver flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The flag is enabled.
    On,
    /// The flag is disabled.
    Off,
}

impl Toggle {
    /// Returns `true` if the flag is enabled.
    ///
    /// ```
    /// use s57tiler_core::options::Toggle;
    ///
    /// assert!(Toggle::On.is_on());
    /// assert!(!Toggle::Off.is_on());
    /// ```
    #[must_use]
    pub fn is_on(&self) -> bool {
        matches!(self, Toggle::On)
    }

    /// Returns the driver spelling of this state.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Toggle::On => "ON",
            Toggle::Off => "OFF",
        }
    }

    fn parse(option: &str, value: &str) -> Result<Self, ConfigError> {
        if value.eq_ignore_ascii_case("on") {
            Ok(Toggle::On)
        } else if value.eq_ignore_ascii_case("off") {
            Ok(Toggle::Off)
        } else {
            Err(ConfigError::InvalidOption {
                option: option.to_string(),
                message: format!("expected ON or OFF, found {value}"),
            })
        }
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        if value { Toggle::On } else { Toggle::Off }
    }
}

/// Typed `OGR_S57_OPTIONS` value.
///
/// The five named flags are the ones this tool relies on; anything else found while parsing is
/// kept in [`S57Options::extra`] and forwarded untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S57Options {
    /// Keep `LNAM` / `LNAM_REFS` attributes for feature to feature linkage.
    pub lnam_refs: Toggle,
    /// Apply update files (`.001`, `.002`, ...) found beside the base cell.
    pub updates: Toggle,
    /// Split multipoint soundings into individual points.
    pub split_multipoint: Toggle,
    /// Preserve empty numeric attributes instead of reporting them as zero.
    pub preserve_empty_numbers: Toggle,
    /// Return linkage attributes (`NAME_RCNM`, `NAME_RCID`, ...).
    pub return_linkages: Toggle,
    /// Additional driver options in the order they were given.
    pub extra: Vec<(String, String)>,
}

impl Default for S57Options {
    fn default() -> Self {
        Self {
            lnam_refs: Toggle::On,
            updates: Toggle::On,
            split_multipoint: Toggle::On,
            preserve_empty_numbers: Toggle::On,
            return_linkages: Toggle::On,
            extra: Vec::new(),
        }
    }
}

impl S57Options {
    /// Renders the options in the form expected by the S-57 driver.
    #[must_use]
    pub fn to_option_string(&self) -> String {
        let named = [
            ("LNAM_REFS", self.lnam_refs),
            ("UPDATES", self.updates),
            ("SPLIT_MULTIPOINT", self.split_multipoint),
            ("PRESERVE_EMPTY_NUMBERS", self.preserve_empty_numbers),
            ("RETURN_LINKAGES", self.return_linkages),
        ];
        named
            .iter()
            .map(|(key, toggle)| format!("{key}:{}", toggle.as_str()))
            .chain(self.extra.iter().map(|(key, value)| format!("{key}:{value}")))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for S57Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_option_string())
    }
}

impl FromStr for S57Options {
    type Err = S57Error;

    /// Parses a driver option list.
    ///
    /// Named flags missing from the input keep their default (on) value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options = S57Options::default();
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once([':', '=']).ok_or_else(|| {
                ConfigError::InvalidOption {
                    option: pair.to_string(),
                    message: "expected KEY:VALUE".to_string(),
                }
            })?;
            let key = key.trim().to_ascii_uppercase();
            let value = value.trim();
            match key.as_str() {
                "LNAM_REFS" => options.lnam_refs = Toggle::parse(&key, value)?,
                "UPDATES" => options.updates = Toggle::parse(&key, value)?,
                "SPLIT_MULTIPOINT" => options.split_multipoint = Toggle::parse(&key, value)?,
                "PRESERVE_EMPTY_NUMBERS" => {
                    options.preserve_empty_numbers = Toggle::parse(&key, value)?;
                },
                "RETURN_LINKAGES" => options.return_linkages = Toggle::parse(&key, value)?,
                _ => options.extra.push((key, value.to_string())),
            }
        }
        Ok(options)
    }
}
