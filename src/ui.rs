// UI layer: interactive credential prompts built on `dialoguer`, and the
// spinner shown while a request is in flight.

use anyhow::Result;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::model::AuthRequest;

/// Collect login credentials, prompting only for what was not passed on
/// the command line.
pub fn prompt_credentials(username: Option<String>, password: Option<String>) -> Result<AuthRequest> {
    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Enter your username").interact_text()?,
    };
    // `Password` hides input in the terminal.
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Enter your password").interact()?,
    };
    Ok(AuthRequest { username, password })
}

/// Collect a username and a password typed twice. Returns `None` when the
/// two entries differ or the password is empty.
pub fn prompt_registration(username: Option<String>) -> Result<Option<AuthRequest>> {
    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Enter username").interact_text()?,
    };
    let password: String = Password::new()
        .with_prompt("Enter your password")
        .allow_empty_password(true)
        .interact()?;
    let repeated: String = Password::new()
        .with_prompt("Repeat your password")
        .allow_empty_password(true)
        .interact()?;
    Ok(registration(username, password, &repeated))
}

fn registration(username: String, password: String, repeated: &str) -> Option<AuthRequest> {
    if password.is_empty() || password != repeated {
        return None;
    }
    Some(AuthRequest { username, password })
}

/// Run `f` behind a spinner on stderr. indicatif hides the spinner when
/// stderr is not a terminal.
pub fn with_spinner<T>(msg: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let out = f();
    spinner.finish_and_clear();
    out
}
