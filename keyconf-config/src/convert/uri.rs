//! Resource identifiers that may be absolute or relative

use super::{FromConfig, Strategy};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Base used only to check that relative references are well formed
const RELATIVE_CHECK_BASE: &str = "http://relative.invalid/";

/// Absolute URL or relative reference, kept exactly as written
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigUri {
    text: String,
    absolute: Option<Url>,
}

impl ConfigUri {
    /// The identifier as it appeared in the configuration
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute.is_some()
    }

    pub fn is_relative(&self) -> bool {
        self.absolute.is_none()
    }

    /// Parsed form of an absolute identifier
    pub fn url(&self) -> Option<&Url> {
        self.absolute.as_ref()
    }

    pub fn into_url(self) -> Option<Url> {
        self.absolute
    }

    /// Resolve a relative reference against `base`; absolute identifiers are returned as is
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        match &self.absolute {
            Some(url) => Ok(url.clone()),
            None => base.join(&self.text),
        }
    }
}

impl FromStr for ConfigUri {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Url::parse(s) {
            Ok(url) => Ok(Self {
                text: s.to_string(),
                absolute: Some(url),
            }),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(RELATIVE_CHECK_BASE)?.join(s)?;
                Ok(Self {
                    text: s.to_string(),
                    absolute: None,
                })
            }
            Err(e) => Err(e),
        }
    }
}

impl fmt::Display for ConfigUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromConfig for ConfigUri {
    fn strategy() -> Strategy<Self> {
        Strategy::Uri(Ok)
    }
}

impl FromConfig for Url {
    fn strategy() -> Strategy<Self> {
        Strategy::Uri(|uri| {
            uri.into_url()
                .ok_or_else(|| "relative reference where an absolute URL is required".to_string())
        })
    }
}
