//! Application shell: announces versions and build metadata on startup

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::config::BuildInfo;
use crate::dashboard::DASHBOARD_VERSION;

/// Root of the application. Construction logs the startup banner.
#[derive(Debug)]
pub struct AppShell {
    build: BuildInfo,
}

impl AppShell {
    pub fn new(build: BuildInfo) -> Self {
        for line in banner_lines(&build) {
            tracing::info!("{}", line);
        }
        Self { build }
    }

    pub fn build(&self) -> &BuildInfo {
        &self.build
    }
}

/// The four startup lines: core version, dashboard version, build id, build date
pub fn banner_lines(build: &BuildInfo) -> Vec<String> {
    vec![
        format!("nds-monitor {}", env!("CARGO_PKG_VERSION")),
        format!("dashboard {}", DASHBOARD_VERSION),
        format!("Build {}-{}", build.build_version, build.build_commit),
        format!("Build Date {}", format_build_date(&build.build_date)),
    ]
}

/// The raw build date, followed by its UTC form when that reads differently
fn format_build_date(raw: &str) -> String {
    match parse_build_date(raw) {
        Some(date) => {
            let utc = date.to_rfc3339_opts(SecondsFormat::Secs, true);
            if utc == raw {
                utc
            } else {
                format!("{} ({})", raw, utc)
            }
        }
        None => format!("{} (Invalid Date)", raw),
    }
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (taken as UTC midnight)
fn parse_build_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
