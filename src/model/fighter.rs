use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN_WEIGHT_CLASS: &str = "Unknown";

/// A fighter row exactly as the upstream feed sends it. Every field may be
/// missing or null.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct RawFighter {
    pub fighter_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub weight_class: Option<String>,
    pub birth_date: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub reach: Option<f64>,
    pub wins: Option<i64>,
    pub losses: Option<i64>,
    pub draws: Option<i64>,
    #[serde(alias = "Nocontests")]
    pub no_contests: Option<i64>,
    pub technical_knockouts: Option<i64>,
    pub technical_knockout_losses: Option<i64>,
    pub submissions: Option<i64>,
    pub submission_losses: Option<i64>,
    pub title_wins: Option<i64>,
    pub title_losses: Option<i64>,
    pub title_draws: Option<i64>,
}

/// A unit-bearing physical measurement, or the `"N/A"` sentinel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Measurement {
    Value(f64),
    NotAvailable,
}

impl From<Option<f64>> for Measurement {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() && v > 0.0 => Self::Value(v),
            _ => Self::NotAvailable,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) if v.fract() == 0.0 => write!(f, "{v:.0}"),
            Self::Value(v) => write!(f, "{v}"),
            Self::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for Measurement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Measurement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Other(IgnoredAny),
        }
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Self::from(Some(v)),
            Repr::Other(_) => Self::NotAvailable,
        })
    }
}

/// Date of birth, or the `"N/A"` sentinel when the feed has none.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BirthDate {
    Known(NaiveDate),
    NotAvailable,
}

impl BirthDate {
    /// Accepts the feed's `1987-07-19T00:00:00` timestamps as well as plain dates.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
            return Self::Known(ts.date());
        }
        match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) => Self::Known(date),
            Err(_) => Self::NotAvailable,
        }
    }

    /// Whole years between the birth date and `today`.
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        match self {
            Self::Known(date) => {
                let mut age = today.year() - date.year();
                if (today.month(), today.day()) < (date.month(), date.day()) {
                    age -= 1;
                }
                u32::try_from(age).ok()
            }
            Self::NotAvailable => None,
        }
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for BirthDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(date) => {
                serializer.serialize_str(&date.format("%Y-%m-%dT00:00:00").to_string())
            }
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for BirthDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map_or(Self::NotAvailable, Self::parse))
    }
}

/// A fighter record with every optional field filled in.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Fighter {
    pub fighter_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub weight_class: String,
    pub birth_date: BirthDate,
    pub height: Measurement,
    pub weight: Measurement,
    pub reach: Measurement,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub no_contests: u32,
    pub technical_knockouts: u32,
    pub technical_knockout_losses: u32,
    pub submissions: u32,
    pub submission_losses: u32,
    pub title_wins: u32,
    pub title_losses: u32,
    pub title_draws: u32,
}

fn count(value: Option<i64>) -> u32 {
    value.map_or(0, |v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
}

impl From<RawFighter> for Fighter {
    fn from(raw: RawFighter) -> Self {
        let weight_class = raw
            .weight_class
            .filter(|w| !w.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_WEIGHT_CLASS.to_string());
        Self {
            fighter_id: raw.fighter_id.unwrap_or(0),
            first_name: raw.first_name.unwrap_or_default(),
            last_name: raw.last_name.unwrap_or_default(),
            nickname: raw.nickname.unwrap_or_default(),
            weight_class,
            birth_date: raw
                .birth_date
                .as_deref()
                .map_or(BirthDate::NotAvailable, BirthDate::parse),
            height: raw.height.into(),
            weight: raw.weight.into(),
            reach: raw.reach.into(),
            wins: count(raw.wins),
            losses: count(raw.losses),
            draws: count(raw.draws),
            no_contests: count(raw.no_contests),
            technical_knockouts: count(raw.technical_knockouts),
            technical_knockout_losses: count(raw.technical_knockout_losses),
            submissions: count(raw.submissions),
            submission_losses: count(raw.submission_losses),
            title_wins: count(raw.title_wins),
            title_losses: count(raw.title_losses),
            title_draws: count(raw.title_draws),
        }
    }
}

impl Fighter {
    /// `trim(FirstName + " " + LastName)`, the key duplicate groups are built on.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    #[must_use]
    pub fn total_fights(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.losses) + u64::from(self.draws)
    }

    #[must_use]
    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.draws)
    }
}

/// A reconciled fighter as the directory shows it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FighterView {
    #[serde(flatten)]
    pub fighter: Fighter,
    /// Another fighter with the same full name survived reconciliation.
    #[serde(rename = "isDuplicate")]
    pub is_duplicate: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let raw: RawFighter =
            serde_json::from_str(r#"{"FighterId": 7, "LastName": "Silva", "Height": null}"#)
                .unwrap();
        let fighter = Fighter::from(raw);
        assert_eq!(fighter.first_name, "");
        assert_eq!(fighter.nickname, "");
        assert_eq!(fighter.weight_class, UNKNOWN_WEIGHT_CLASS);
        assert_eq!(fighter.wins, 0);
        assert_eq!(fighter.height, Measurement::NotAvailable);
        assert_eq!(fighter.birth_date, BirthDate::NotAvailable);
        assert_eq!(fighter.full_name(), "Silva");

        let json = serde_json::to_value(&fighter).unwrap();
        assert_eq!(json["Height"], "N/A");
        assert_eq!(json["BirthDate"], "N/A");
    }

    #[test]
    fn birth_date_age_counts_whole_years() {
        let born = BirthDate::parse("1987-07-19T00:00:00");
        let before_birthday = NaiveDate::from_ymd_opt(2024, 7, 18).unwrap();
        let on_birthday = NaiveDate::from_ymd_opt(2024, 7, 19).unwrap();
        assert_eq!(born.age_on(before_birthday), Some(36));
        assert_eq!(born.age_on(on_birthday), Some(37));
        assert_eq!(BirthDate::parse("soon").age_on(on_birthday), None);
    }

    #[test]
    fn measurements_display_without_trailing_zero() {
        assert_eq!(Measurement::Value(76.0).to_string(), "76");
        assert_eq!(Measurement::Value(84.5).to_string(), "84.5");
        assert_eq!(Measurement::from(Some(0.0)), Measurement::NotAvailable);
    }
}
