//! Miscellaneous wire types with gateway-specific text formats.

use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A service date, transmitted as `YYYY/MM/DD HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDate(pub NaiveDateTime);

impl ServiceDate {
    pub const FORMAT: &str = "%Y/%m/%d %H:%M";
}

impl From<NaiveDateTime> for ServiceDate {
    fn from(value: NaiveDateTime) -> Self {
        ServiceDate(value)
    }
}

impl Display for ServiceDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl Serialize for ServiceDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ServiceDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(s.trim(), Self::FORMAT)
            .map(ServiceDate)
            .map_err(serde::de::Error::custom)
    }
}

/// Card expiry in the `MMYY` form the gateway requires.
///
/// Separators are stripped on construction, so `"12/25"` becomes `"1225"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardExpiry(String);

impl CardExpiry {
    pub fn new(expiry: impl AsRef<str>) -> Self {
        CardExpiry(expiry.as_ref().trim().replace('/', ""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardExpiry {
    fn from(value: &str) -> Self {
        CardExpiry::new(value)
    }
}

impl From<String> for CardExpiry {
    fn from(value: String) -> Self {
        CardExpiry::new(value)
    }
}

impl Display for CardExpiry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CardExpiry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// A boolean the gateway spells `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flag(pub bool);

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag(value)
    }
}

impl Serialize for Flag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(if self.0 { "1" } else { "0" })
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.trim() {
            "" | "0" => Ok(Flag(false)),
            "1" => Ok(Flag(true)),
            other => Err(serde::de::Error::custom(format!(
                "Unsupported flag value '{other}'; expected 0 or 1"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_expiry_separator_is_stripped() {
        assert_eq!(CardExpiry::new("12/25").as_str(), "1225");
        assert_eq!(CardExpiry::from("1225").as_str(), "1225");
        assert_eq!(CardExpiry::from(" 01/30 ".to_string()).as_str(), "0130");
    }

    #[test]
    fn test_service_date_format() {
        let date = NaiveDate::from_ymd_opt(2013, 12, 20)
            .and_then(|d| d.and_hms_opt(19, 0, 0))
            .unwrap();
        assert_eq!(ServiceDate(date).to_string(), "2013/12/20 19:00");
    }
}
