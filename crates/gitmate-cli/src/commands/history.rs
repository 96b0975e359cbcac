//! Commit history display.

use std::path::Path;

use chrono::{Duration, Utc};
use colored::Colorize;

use super::open_session;
use crate::error::Result;

pub fn run_history(path: &Path, days: Option<i64>, json: bool) -> Result<()> {
    let session = open_session(path)?;
    let since = days.map(|d| Utc::now() - Duration::days(d));
    let records = session.history(since);

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No commits to show");
        return Ok(());
    }
    for record in &records {
        println!(
            "{} {} {} {}",
            record.short_id().yellow(),
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.author.cyan(),
            record.summary()
        );
    }
    Ok(())
}
