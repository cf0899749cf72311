//! Line-oriented command scripts.
//!
//! One command per line, keywords case-insensitive, `#` starts a comment:
//!
//! ```text
//! toggle uc-1
//! direction vertical
//! select agent-7
//! select none
//! expand-all
//! collapse-all
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::engine::Action;
use crate::error::CommandParseError;
use crate::layout::Direction;
use crate::visibility::Command;

static COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(toggle|select|direction|expand-all|collapse-all)(?:\s+(\S+))?$")
        .expect("command pattern is valid")
});

/// Parse a single command line (already stripped of comments).
pub fn parse_command(line: &str) -> Result<Action, String> {
    let line = line.trim();
    let caps = COMMAND_RE
        .captures(line)
        .ok_or_else(|| format!("unrecognised command '{line}'"))?;
    let keyword = caps[1].to_lowercase();
    let arg = caps.get(2).map(|m| m.as_str());

    match (keyword.as_str(), arg) {
        ("toggle", Some(id)) => Ok(Command::ToggleNode(id.to_string()).into()),
        ("select", Some(id)) if id.eq_ignore_ascii_case("none") => Ok(Action::Select(None)),
        ("select", Some(id)) => Ok(Action::Select(Some(id.to_string()))),
        ("direction", Some(dir)) => Ok(Command::SetDirection(dir.parse::<Direction>()?).into()),
        ("expand-all", None) => Ok(Command::ExpandAll.into()),
        ("collapse-all", None) => Ok(Command::CollapseAll.into()),
        ("expand-all" | "collapse-all", Some(extra)) => {
            Err(format!("'{keyword}' takes no argument, got '{extra}'"))
        }
        (_, None) => Err(format!("'{keyword}' needs an argument")),
        (other, Some(_)) => Err(format!("unrecognised command '{other}'")),
    }
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(src: &str) -> Result<Vec<Action>, CommandParseError> {
    let mut actions = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let action = parse_command(line).map_err(|message| CommandParseError {
            line: idx + 1,
            message,
        })?;
        actions.push(action);
    }
    Ok(actions)
}

#[cfg(test)]
#[path = "../tests/rust/test_commands.rs"]
mod tests;
