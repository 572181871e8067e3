//! Format templates handed to tmux `-F` and the parsers that read the
//! resulting listings back into models.
//!
//! Fields are colon-joined. Names may contain any character except that a
//! name containing `:` followed by something that looks like the next field
//! can be split in the wrong place; tmux offers no escaping for `-F` output.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::error::TmuxError;
use super::identity::Id;
use super::pane::Pane;
use super::session::Session;
use super::window::Window;

/// One line per pane.
pub const LIST_PANES_FORMAT: &str = concat!(
    "#{session_id}:#{session_name}:#{window_id}:#{window_name}:#{window_index}:",
    "#{pane_id}:#{pane_active}:#{pane_index}"
);

/// One line per window. Also the `-P -F` template for `new-session` and
/// `new-window`, so creation responses go through [`parse_windows`].
pub const LIST_WINDOWS_FORMAT: &str =
    "#{session_id}:#{session_name}:#{window_id}:#{window_name}:#{window_index}";

/// One line per session.
pub const LIST_SESSIONS_FORMAT: &str = "#{session_id}:#{session_name}";

static RE_PANE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$([^:]*):(.+):@([^:]*):(.+):([^:]*):%([^:]*):([01]):([^:]*)$").unwrap()
});

static RE_WINDOW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$([^:]*):(.+):@([^:]*):(.+):([^:]*)$").unwrap());

static RE_SESSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$([^:]*):(.+)$").unwrap());

/// Parse `list-panes -F LIST_PANES_FORMAT` output in listing order.
///
/// Lines that don't have the expected shape are skipped. A numeric field that
/// doesn't parse fails the whole listing.
pub fn parse_panes(output: &str) -> Result<Vec<Pane>, TmuxError> {
    let mut panes = Vec::new();

    for (idx, line) in output.lines().enumerate() {
        let Some(caps) = RE_PANE.captures(line) else {
            continue;
        };
        let line_num = idx + 1;

        panes.push(Pane {
            id: Id::Realized(number(&caps, 6, "pane_id", line_num)?),
            session_id: number(&caps, 1, "session_id", line_num)?,
            session_name: caps[2].to_string(),
            window_id: number(&caps, 3, "window_id", line_num)?,
            window_name: caps[4].to_string(),
            window_index: number(&caps, 5, "window_index", line_num)?,
            active: &caps[7] == "1",
            index: number(&caps, 8, "pane_index", line_num)?,
        });
    }

    Ok(panes)
}

/// Parse `list-windows -F LIST_WINDOWS_FORMAT` output. Returned windows are
/// realized and carry no panes.
pub fn parse_windows(output: &str) -> Result<Vec<Window>, TmuxError> {
    let mut windows = Vec::new();

    for (idx, line) in output.lines().enumerate() {
        let Some(caps) = RE_WINDOW.captures(line) else {
            continue;
        };
        let line_num = idx + 1;

        windows.push(Window {
            name: caps[4].to_string(),
            id: Id::Realized(number(&caps, 3, "window_id", line_num)?),
            index: number(&caps, 5, "window_index", line_num)?,
            session_id: Id::Realized(number(&caps, 1, "session_id", line_num)?),
            session_name: caps[2].to_string(),
            ..Window::default()
        });
    }

    Ok(windows)
}

/// Parse `list-sessions -F LIST_SESSIONS_FORMAT` output.
pub fn parse_sessions(output: &str) -> Result<Vec<Session>, TmuxError> {
    let mut sessions = Vec::new();

    for (idx, line) in output.lines().enumerate() {
        let Some(caps) = RE_SESSION.captures(line) else {
            continue;
        };

        sessions.push(Session {
            name: caps[2].to_string(),
            id: Id::Realized(number(&caps, 1, "session_id", idx + 1)?),
            ..Session::default()
        });
    }

    Ok(sessions)
}

fn number(
    caps: &Captures<'_>,
    group: usize,
    field: &str,
    line_num: usize,
) -> Result<u32, TmuxError> {
    let raw = &caps[group];
    raw.parse().map_err(|e| TmuxError::Parse {
        line_num,
        detail: format!("{} {:?}: {}", field, raw, e),
    })
}
