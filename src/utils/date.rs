use chrono::NaiveDateTime;

// Dates are stored in this format so that string comparison orders them chronologically.
pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn format_date(date: NaiveDateTime) -> String {
    format!("{}", date.format(DATE_FMT))
}

pub fn parse_date(str_date: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(str_date, DATE_FMT).ok()
}

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde::de::Error;
    use crate::utils::date::{format_date, parse_date};

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(format_date(*time).as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        parse_date(&str_time).ok_or_else(|| D::Error::custom(format!("invalid date {}", str_time)))
    }
}

pub mod opt_serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde::de::Error;
    use crate::utils::date::{format_date, parse_date};

    pub fn serialize<S: Serializer>(time: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_str(format_date(*time).as_str()),
            None => serializer.serialize_none(),
        }
    }

    // empty strings are treated as absent dates
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let str_time: Option<String> = Deserialize::deserialize(deserializer)?;
        match str_time {
            Some(str_time) if !str_time.is_empty() => {
                parse_date(&str_time).map(Some).ok_or_else(|| D::Error::custom(format!("invalid date {}", str_time)))
            }
            _ => Ok(None),
        }
    }
}
