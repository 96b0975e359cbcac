//! Repository initialization.

use std::path::Path;

use colored::Colorize;
use gitmate_core::Session;

use crate::error::Result;

pub fn run_init(path: &Path) -> Result<()> {
    let mut session = Session::new();
    session.init_repository(path)?;
    println!(
        "{} Initialized repository at {}",
        "OK".green().bold(),
        path.display()
    );
    for line in session.advise().lines() {
        println!("   {line}");
    }
    Ok(())
}
