use crate::Result;
use anyhow::Context;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, format_description::well_known::Rfc3339,
    macros::format_description,
};

/// Text to temporal value parsing, accepting the formats databases return and users type.
pub trait Parse {
    fn parse(value: impl AsRef<str>) -> Result<Self>
    where
        Self: Sized;
}

impl Parse for Date {
    fn parse(value: impl AsRef<str>) -> Result<Self> {
        time::Date::parse(value.as_ref(), format_description!("[year]-[month]-[day]"))
            .with_context(|| format!("Cannot parse '{}' as time::Date", value.as_ref()))
    }
}

impl Parse for Time {
    fn parse(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref();
        time::Time::parse(
            value,
            format_description!("[hour]:[minute]:[second].[subsecond]"),
        )
        .or(time::Time::parse(
            value,
            format_description!("[hour]:[minute]:[second]"),
        ))
        .or(time::Time::parse(
            value,
            format_description!("[hour]:[minute]"),
        ))
        .with_context(|| format!("Cannot parse '{}' as time::Time", value))
    }
}

impl Parse for PrimitiveDateTime {
    fn parse(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref();
        time::PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        )
        .or(time::PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        ))
        .or(time::PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        ))
        .or(time::PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
        ))
        .or(time::PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        ))
        .or(time::PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day] [hour]:[minute]"),
        ))
        .with_context(|| format!("Cannot parse '{}' as time::PrimitiveDateTime", value))
    }
}

impl Parse for OffsetDateTime {
    fn parse(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref();
        time::OffsetDateTime::parse(value, &Rfc3339)
        .or(time::OffsetDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory]:[offset_minute]")
        ))
        .or(time::OffsetDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory]")
        ))
        .or(time::OffsetDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]")
        ))
        .or(time::OffsetDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]")
        ))
        .or(time::OffsetDateTime::parse(
            value,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]")
        ))
        .with_context(|| format!("Cannot parse '{}' as time::OffsetDateTime", value))
    }
}

/// Time of day, optionally followed by a zone designator (`Z`, `+02`, `-05:30`).
pub fn parse_time_of_day(value: &str) -> Result<Time> {
    let value = value.trim();
    let time = value
        .strip_suffix(['Z', 'z'])
        .or_else(|| {
            value.rfind(['+', '-']).and_then(|i| {
                let zone = &value[i + 1..];
                let is_zone = matches!(zone.len(), 2 | 4 | 5)
                    && zone.chars().enumerate().all(|(i, c)| {
                        c.is_ascii_digit() || (i == 2 && c == ':' && zone.len() == 5)
                    });
                is_zone.then(|| &value[..i])
            })
        })
        .unwrap_or(value);
    <Time as Parse>::parse(time)
}

/// Date, date time or date time with offset, in this order.
pub fn is_date_time(value: &str) -> bool {
    let value = value.trim();
    <Date as Parse>::parse(value).is_ok()
        || <PrimitiveDateTime as Parse>::parse(value).is_ok()
        || <OffsetDateTime as Parse>::parse(value).is_ok()
}
