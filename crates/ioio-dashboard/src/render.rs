//! Text rendering of statistics, tables and the detail view.

use std::fmt::Display;

use chrono::{DateTime, Local, Locale, TimeZone, Utc};
use ioio_core::record::timestamp;
use ioio_core::RecordKind;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::client::Row;
use crate::snapshot::{Section, Snapshot, Stats};

/// Marker for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Shown in place of rows for an empty table.
pub const NO_DATA: &str = "No data available";

/// Shown in place of rows when a section failed to load.
pub const LOAD_ERROR: &str = "Error loading data";

/// Display pattern: locale date, then hours and minutes.
const TIMESTAMP_FORMAT: &str = "%x %H:%M";

/// Resolve the display locale from `LC_ALL`, `LC_TIME` and `LANG`, in that
/// order. `de_DE.UTF-8` and `de_DE@euro` both resolve to `de_DE`; `C`, unset
/// and unknown values fall back to POSIX.
pub fn locale_from_lookup<F>(lookup: F) -> Locale
where
    F: Fn(&str) -> Option<String>,
{
    let raw = ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .filter_map(|name| lookup(*name))
        .find(|value| !value.trim().is_empty());
    let Some(raw) = raw else {
        return Locale::POSIX;
    };
    let name = raw.split(['.', '@']).next().unwrap_or_default().trim();
    match name {
        "" | "C" | "POSIX" => Locale::POSIX,
        name => Locale::try_from(name).unwrap_or(Locale::POSIX),
    }
}

/// Time zone and locale used for every rendered timestamp.
#[derive(Debug, Clone)]
pub struct TimeDisplay<Tz> {
    tz: Tz,
    locale: Locale,
}

impl<Tz> TimeDisplay<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Render in `tz` with `locale`.
    pub fn new(tz: Tz, locale: Locale) -> Self {
        Self { tz, locale }
    }

    /// Date in the locale's short form, then `HH:MM`.
    pub fn format(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.tz)
            .format_localized(TIMESTAMP_FORMAT, self.locale)
            .to_string()
    }
}

impl TimeDisplay<Local> {
    /// Local time zone with the locale from the environment.
    pub fn local() -> Self {
        Self::new(Local, locale_from_lookup(|name| std::env::var(name).ok()))
    }
}

/// Table columns for a kind: (field, header).
pub fn columns(kind: RecordKind) -> [(&'static str, &'static str); 5] {
    match kind {
        RecordKind::Property => [
            ("id", "ID"),
            ("name", "Name"),
            ("email", "Email"),
            ("property_type", "Property Type"),
            ("created_at", "Created"),
        ],
        RecordKind::Service => [
            ("id", "ID"),
            ("name", "Name"),
            ("email", "Email"),
            ("service_type", "Service Type"),
            ("created_at", "Created"),
        ],
    }
}

/// Format a stored timestamp for `time`. Unparsable values are shown raw.
pub fn format_timestamp_in<Tz>(value: Option<&Value>, time: &TimeDisplay<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(raw)) if raw.is_empty() => NOT_AVAILABLE.to_string(),
        Some(Value::String(raw)) => match timestamp::parse(raw) {
            Ok(at) => time.format(at),
            Err(_) => raw.clone(),
        },
        Some(other) => other.to_string(),
    }
}

/// Plain cell text: strings as-is, other values in JSON form, null as N/A.
pub fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// `property_type` → `Property Type`.
pub fn humanize(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_timestamp_field(key: &str) -> bool {
    key.contains("date") || key.contains("created")
}

/// Statistics block.
pub fn render_stats(stats: &Stats) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Total Properties", "Total Services", "Recent (24h)"]);
    builder.push_record([
        stats.total_properties.to_string(),
        stats.total_services.to_string(),
        stats.recent.to_string(),
    ]);
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

/// One section as a table, timestamps rendered for `time`.
pub fn render_section_in<Tz>(section: &Section, time: &TimeDisplay<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let columns = columns(section.kind);
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|(_, header)| header.to_string()));

    let placeholder = |text: &str| {
        let mut record = vec![String::new(); columns.len()];
        record[0] = text.to_string();
        record
    };

    match &section.rows {
        Err(_) => builder.push_record(placeholder(LOAD_ERROR)),
        Ok(rows) if rows.is_empty() => builder.push_record(placeholder(NO_DATA)),
        Ok(rows) => {
            for row in rows {
                builder.push_record(columns.iter().map(|(field, _)| {
                    if *field == "created_at" {
                        format_timestamp_in(row.get(*field), time)
                    } else {
                        cell(row.get(*field))
                    }
                }));
            }
        }
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

fn section_heading(kind: RecordKind) -> String {
    humanize(kind.plural())
}

/// Statistics followed by both tables, timestamps rendered for `time`.
pub fn render_dashboard_in<Tz>(
    stats: &Stats,
    snapshot: &Snapshot,
    time: &TimeDisplay<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    out.push_str(&render_stats(stats));
    for section in [&snapshot.properties, &snapshot.services] {
        out.push_str("\n\n");
        out.push_str(&section_heading(section.kind));
        out.push('\n');
        out.push_str(&render_section_in(section, time));
        if let Err(reason) = &section.rows {
            out.push('\n');
            out.push_str(reason);
        }
    }
    out.push('\n');
    out
}

/// Field order for the detail view: the record's own fields first, then any
/// others alphabetically.
fn detail_order(kind: RecordKind, row: &Row) -> Vec<String> {
    let known: &[&str] = match kind {
        RecordKind::Property => &[
            "name",
            "age",
            "email",
            "phone",
            "property_type",
            "bedrooms",
            "rooms",
            "message",
            "created_at",
        ],
        RecordKind::Service => &[
            "name",
            "age",
            "email",
            "phone",
            "service_type",
            "beauty_type",
            "message",
            "created_at",
        ],
    };
    let mut keys: Vec<String> = known
        .iter()
        .filter(|k| row.contains_key(**k))
        .map(|k| k.to_string())
        .collect();
    let mut rest: Vec<String> = row
        .keys()
        .filter(|k| k.as_str() != "id" && !known.contains(&k.as_str()))
        .cloned()
        .collect();
    rest.sort();
    keys.extend(rest);
    keys
}

/// Every field of one record except `id`, timestamps rendered for `time`.
pub fn render_detail_in<Tz>(kind: RecordKind, row: &Row, time: &TimeDisplay<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut builder = Builder::default();
    for key in detail_order(kind, row) {
        let value = row.get(&key);
        let text = if is_timestamp_field(&key) {
            format_timestamp_in(value, time)
        } else {
            match cell(value) {
                empty if empty.is_empty() => NOT_AVAILABLE.to_string(),
                text => text,
            }
        };
        builder.push_record([humanize(&key), text]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    format!("{} Details\n{}\n", kind.title(), table)
}

/// Detail view in local time.
pub fn render_detail(kind: RecordKind, row: &Row) -> String {
    render_detail_in(kind, row, &TimeDisplay::local())
}

/// Dashboard header with the generation time.
pub fn render_generated_at<Tz>(at: DateTime<Utc>, time: &TimeDisplay<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("IOIO Dashboard  ({})", time.format(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    fn utc() -> TimeDisplay<Utc> {
        TimeDisplay::new(Utc, Locale::POSIX)
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn humanize_labels() {
        assert_eq!(humanize("property_type"), "Property Type");
        assert_eq!(humanize("created_at"), "Created At");
        assert_eq!(humanize("name"), "Name");
        assert_eq!(humanize("beauty__type"), "Beauty Type");
    }

    #[test]
    fn timestamps_render_date_and_minutes() {
        let value = json!("2026-03-10T09:05:59Z");
        assert_eq!(format_timestamp_in(Some(&value), &utc()), "03/10/26 09:05");
        assert_eq!(format_timestamp_in(None, &utc()), "N/A");
        assert_eq!(format_timestamp_in(Some(&Value::Null), &utc()), "N/A");
        assert_eq!(format_timestamp_in(Some(&json!("soon")), &utc()), "soon");
    }

    #[test]
    fn timestamps_follow_the_locale_date_form() {
        let at = Utc.with_ymd_and_hms(2026, 3, 10, 9, 5, 0).unwrap();
        let german = TimeDisplay::new(Utc, locale_from_lookup(env(&[("LANG", "de_DE.UTF-8")])));
        assert_eq!(german.format(at), "10.03.2026 09:05");
        assert_eq!(utc().format(at), "03/10/26 09:05");
    }

    #[test]
    fn locale_lookup_precedence_and_fallback() {
        assert_eq!(
            locale_from_lookup(env(&[("LANG", "en_US.UTF-8"), ("LC_ALL", "de_DE@euro")])),
            Locale::de_DE
        );
        assert_eq!(
            locale_from_lookup(env(&[("LANG", "en_US.UTF-8"), ("LC_TIME", "fr_FR")])),
            Locale::fr_FR
        );
        assert_eq!(locale_from_lookup(env(&[("LANG", "C.UTF-8")])), Locale::POSIX);
        assert_eq!(locale_from_lookup(env(&[("LANG", "xx_YY")])), Locale::POSIX);
        assert_eq!(locale_from_lookup(env(&[("LC_ALL", "")])), Locale::POSIX);
        assert_eq!(locale_from_lookup(env(&[])), Locale::POSIX);
    }

    #[test]
    fn cells_show_na_for_absent_values() {
        assert_eq!(cell(None), "N/A");
        assert_eq!(cell(Some(&Value::Null)), "N/A");
        assert_eq!(cell(Some(&json!(7))), "7");
        assert_eq!(cell(Some(&json!("house"))), "house");
    }

    #[test]
    fn property_table_has_fixed_columns() {
        let section = Section {
            kind: RecordKind::Property,
            rows: Ok(vec![row(json!({
                "id": 3,
                "name": "Ann",
                "email": "ann@x.com",
                "property_type": "house",
                "created_at": "2026-03-10T09:05:00Z",
                "message": "not a column"
            }))]),
        };
        let table = render_section_in(&section, &utc());
        for expected in ["ID", "Name", "Email", "Property Type", "Created", "Ann", "house", "03/10/26 09:05"] {
            assert!(table.contains(expected), "missing {expected} in\n{table}");
        }
        assert!(!table.contains("not a column"));
    }

    #[test]
    fn service_table_missing_type_shows_na() {
        let section = Section {
            kind: RecordKind::Service,
            rows: Ok(vec![row(json!({"id": 1, "name": "Bo", "email": "b@x.com"}))]),
        };
        let table = render_section_in(&section, &utc());
        assert!(table.contains("Service Type"));
        assert!(table.contains("N/A"));
    }

    #[test]
    fn empty_and_failed_sections() {
        let empty = Section {
            kind: RecordKind::Service,
            rows: Ok(vec![]),
        };
        assert!(render_section_in(&empty, &utc()).contains(NO_DATA));

        let failed = Section {
            kind: RecordKind::Property,
            rows: Err("connection refused".into()),
        };
        assert!(render_section_in(&failed, &utc()).contains(LOAD_ERROR));
    }

    #[test]
    fn dashboard_shows_stats_and_both_sections() {
        let snapshot = Snapshot {
            properties: Section {
                kind: RecordKind::Property,
                rows: Err("connection refused".into()),
            },
            services: Section {
                kind: RecordKind::Service,
                rows: Ok(vec![]),
            },
        };
        let stats = Stats {
            total_properties: 0,
            total_services: 0,
            recent: 0,
        };
        let out = render_dashboard_in(&stats, &snapshot, &utc());
        assert!(out.contains("Recent (24h)"));
        assert!(out.contains("Properties"));
        assert!(out.contains("Services"));
        assert!(out.contains(LOAD_ERROR));
        assert!(out.contains("connection refused"));
        assert!(out.contains(NO_DATA));
    }

    #[test]
    fn detail_excludes_id_and_humanizes_labels() {
        let r = row(json!({
            "id": 9,
            "name": "Ann",
            "property_type": "flat",
            "bedrooms": null,
            "rooms": "",
            "created_at": "2026-03-10T09:05:00Z",
            "extra_note": "vip"
        }));
        let out = render_detail_in(RecordKind::Property, &r, &utc());
        assert!(out.starts_with("Property Details"));
        assert!(out.contains("Property Type"));
        assert!(out.contains("Bedrooms"));
        assert!(out.contains("Extra Note"));
        assert!(out.contains("03/10/26 09:05"));
        assert!(!out.contains("Id "));
        assert_eq!(out.matches("N/A").count(), 2);
    }

    #[test]
    fn detail_order_puts_known_fields_first() {
        let r = row(json!({"zeta": 1, "message": "m", "name": "n", "id": 1}));
        assert_eq!(detail_order(RecordKind::Service, &r), vec!["name", "message", "zeta"]);
    }
}
