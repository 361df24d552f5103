//! Time utilities: timezone-aware parsing of wall-clock input.

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse a wall-clock time like "2026-03-02 14:30" in an IANA tz like
/// "America/Chicago", returning UTC.
pub fn parse_local_to_utc(local: &str, tz: &str) -> Result<DateTime<Utc>> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;

    let ndt = NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M")
        .map_err(|e| anyhow::anyhow!("invalid local datetime '{local}': {e}"))?;

    let local_dt = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {local} {tz}"))?;

    Ok(local_dt.with_timezone(&Utc))
}

/// Helper: format a UTC time into RFC3339.
pub fn to_rfc3339_utc(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
