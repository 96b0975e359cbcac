//! Author identity commands and the push-time prompt.

use std::path::Path;

use colored::Colorize;
use dialoguer::Input;
use gitmate_core::IdentitySource;
use gitmate_git::Identity;

use super::open_session;
use crate::error::Result;

/// Asks for name and email when push preflight finds no identity.
pub struct PromptIdentity;

impl IdentitySource for PromptIdentity {
    fn request_identity(&self) -> Option<Identity> {
        println!("{}", "Author identity is not configured yet.".yellow());
        let name: String = Input::new()
            .with_prompt("Your name")
            .interact_text()
            .ok()?;
        let email: String = Input::new()
            .with_prompt("Your email")
            .interact_text()
            .ok()?;
        if name.trim().is_empty() || email.trim().is_empty() {
            return None;
        }
        Some(Identity { name, email })
    }
}

pub fn run_identity_show(path: &Path) -> Result<()> {
    let session = open_session(path)?;
    match session.identity()? {
        Some(identity) => println!("{} <{}>", identity.name, identity.email),
        None => println!("Author identity is not configured"),
    }
    Ok(())
}

pub fn run_identity_set(path: &Path, name: &str, email: &str) -> Result<()> {
    let session = open_session(path)?;
    session.set_identity(name, email)?;
    println!(
        "{} Identity set to {} <{}>",
        "OK".green().bold(),
        name,
        email
    );
    Ok(())
}
