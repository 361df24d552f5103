use anyhow::Result;
use mentark_core::EnergyProfile;
use std::io::{self, Write};

use crate::state::{profile_path, write_profile, Profile};

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

fn prompt_energy(label: &str, default: u8) -> Result<u8> {
    loop {
        let s = prompt(&format!("{label} energy 1-10 (default {default})"))?;
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<u8>() {
            Ok(v) if (1..=10).contains(&v) => return Ok(v),
            _ => println!("Please enter a number 1-10."),
        }
    }
}

pub fn run_setup() -> Result<()> {
    println!("Mentark setup\n");
    println!("Rate your typical energy in each part of the day.");

    let defaults = EnergyProfile::default();
    let energy = EnergyProfile {
        morning: prompt_energy("Morning (6am-12pm)", defaults.morning)?,
        afternoon: prompt_energy("Afternoon (12pm-5pm)", defaults.afternoon)?,
        evening: prompt_energy("Evening (5pm-10pm)", defaults.evening)?,
        night: prompt_energy("Night (10pm-6am)", defaults.night)?,
    };

    let user = prompt("\nUser id for AI recommendations (blank to skip)")?;
    let tz = prompt("Timezone (default America/Chicago)")?;

    let profile = Profile {
        created_at_utc: Some(chrono::Utc::now().to_rfc3339()),
        user_id: if user.is_empty() { None } else { Some(user) },
        timezone: if tz.is_empty() {
            "America/Chicago".to_string()
        } else {
            tz
        },
        energy,
    };
    write_profile(&profile)?;

    println!("\nWrote: {}", profile_path()?.display());
    println!("Next: mentark schedule --plan day.json");
    Ok(())
}
