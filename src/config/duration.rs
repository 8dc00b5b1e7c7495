//! Human-readable durations for config files (`"100ms"`, `"5m"`).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serde adapter for `Duration` fields written in humantime form.
pub(crate) mod humantime_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

/// How long an idle mailbox is kept before it is removed.
///
/// Written as a duration, or any negative non-zero duration (conventionally
/// `"-1s"`) to keep mailboxes forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleTimeout {
    Never,
    After(Duration),
}

impl Default for StaleTimeout {
    fn default() -> Self {
        Self::After(Duration::ZERO)
    }
}

impl StaleTimeout {
    /// Eviction delay, or `None` when mailboxes never expire.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::Never => None,
            Self::After(d) => Some(*d),
        }
    }
}

impl fmt::Display for StaleTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => f.write_str("-1s"),
            Self::After(d) => write!(f, "{}", humantime::format_duration(*d)),
        }
    }
}

impl FromStr for StaleTimeout {
    type Err = humantime::DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_prefix('-') {
            Some(magnitude) => {
                let d = humantime::parse_duration(magnitude)?;
                if d.is_zero() {
                    Ok(Self::After(d))
                } else {
                    Ok(Self::Never)
                }
            }
            None => humantime::parse_duration(s).map(Self::After),
        }
    }
}

impl Serialize for StaleTimeout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StaleTimeout {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_means_never() {
        assert_eq!("-1s".parse::<StaleTimeout>().unwrap(), StaleTimeout::Never);
        assert_eq!("-5m".parse::<StaleTimeout>().unwrap(), StaleTimeout::Never);
        assert_eq!(StaleTimeout::Never.duration(), None);
        assert_eq!(StaleTimeout::Never.to_string(), "-1s");
    }

    #[test]
    fn test_negative_zero_is_zero() {
        assert_eq!(
            "-0s".parse::<StaleTimeout>().unwrap(),
            StaleTimeout::After(Duration::ZERO)
        );
    }

    #[test]
    fn test_positive_timeout() {
        let t: StaleTimeout = "5m".parse().unwrap();
        assert_eq!(t, StaleTimeout::After(Duration::from_secs(300)));
        assert_eq!(t.duration(), Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!("soon".parse::<StaleTimeout>().is_err());
        assert!("-forever".parse::<StaleTimeout>().is_err());
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(StaleTimeout::default(), StaleTimeout::After(Duration::ZERO));
        assert_eq!(StaleTimeout::default().to_string(), "0s");
    }
}
