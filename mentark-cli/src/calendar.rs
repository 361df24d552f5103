use anyhow::{bail, Context, Result};
use mentark_core::TimeBlock;
use std::io::Write;

/// Emit a minimal ICS calendar with one VEVENT per placed block.
///
/// DTSTART/DTEND are UTC.
pub fn blocks_to_ics(blocks: &[TimeBlock]) -> String {
    let mut s = String::new();
    s.push_str("BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:-//Mentark//EN\n");

    for b in blocks {
        let dtstart = b.start_time.format("%Y%m%dT%H%M%SZ");
        let dtend = b.end_time.format("%Y%m%dT%H%M%SZ");

        s.push_str("BEGIN:VEVENT\n");
        s.push_str(&format!("UID:mentark-{}@mentark\n", b.task_id));
        s.push_str(&format!("DTSTART:{}\n", dtstart));
        s.push_str(&format!("DTEND:{}\n", dtend));
        s.push_str(&format!("SUMMARY:{}\n", escape_ics(&b.task_title)));
        s.push_str(&format!(
            "DESCRIPTION:{}\n",
            escape_ics(&format!(
                "TaskId: {}\nCategory: {}\nEnergy: {}\nMinutes: {}\n",
                b.task_id,
                b.category,
                b.energy_level.label(),
                b.estimated_minutes
            ))
        ));
        s.push_str("END:VEVENT\n");
    }

    s.push_str("END:VCALENDAR\n");
    s
}

fn escape_ics(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}

/// Push ICS to Google Calendar using gcalcli import.
///
/// Requires `gcalcli` installed and authenticated on the machine.
pub fn push_ics_via_gcalcli(ics: &str, calendar: Option<&str>) -> Result<()> {
    if which::which("gcalcli").is_err() {
        bail!(
            "gcalcli is not installed. Install it, authenticate, then retry.\n\nmacOS (brew):  brew install gcalcli\nUbuntu (pipx): pipx install gcalcli\n\nOr use: mentark schedule --export-ics schedule.ics"
        );
    }

    let mut cmd = std::process::Command::new("gcalcli");
    cmd.arg("import");
    if let Some(cal) = calendar {
        cmd.args(["--calendar", cal]);
    }

    let mut child = cmd
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::inherit())
        .stderr(std::process::Stdio::inherit())
        .spawn()
        .context("spawning gcalcli import")?;

    {
        let stdin = child.stdin.as_mut().context("no stdin")?;
        stdin
            .write_all(ics.as_bytes())
            .context("writing ICS to gcalcli")?;
    }

    let status = child.wait().context("waiting on gcalcli")?;
    if !status.success() {
        bail!("gcalcli import failed: {status}");
    }

    Ok(())
}
