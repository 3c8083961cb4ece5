// Console formatting for actions and status lines.

use std::fmt::Write as _;
use std::io::{self, Write};

use crossterm::style::Stylize;

use crate::model::Action;

pub const DELIMITER: &str = "----------------------------------";

/// One action block followed by the delimiter line.
pub fn render_action(action: &Action) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Id : {}", action.id.as_deref().unwrap_or_default());
    let _ = writeln!(out, "Description : {}", action.description);
    let _ = writeln!(out, "Result : {}", action.result);
    let _ = writeln!(out, "Timestamp : {}", action.timestamp);
    let _ = writeln!(out, "{}", DELIMITER);
    out
}

/// All actions in the order given. A non-empty list opens with a
/// delimiter; an empty one renders as nothing.
pub fn render_actions(actions: &[Action]) -> String {
    if actions.is_empty() {
        return String::new();
    }
    let mut out = format!("{}\n", DELIMITER);
    for action in actions {
        out.push_str(&render_action(action));
    }
    out
}

pub fn write_actions(w: &mut impl Write, actions: &[Action]) -> io::Result<()> {
    w.write_all(render_actions(actions).as_bytes())?;
    w.flush()
}

pub fn print_actions(actions: &[Action]) -> io::Result<()> {
    write_actions(&mut io::stdout().lock(), actions)
}

/// Print one action block without the opening delimiter.
pub fn print_action(action: &Action) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(render_action(action).as_bytes())?;
    out.flush()
}

pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().green());
}

pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().yellow());
}

pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}
