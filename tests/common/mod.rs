//! In-memory stand-in for a tmux server.

use std::sync::{Arc, Mutex};

use tmux_workflow::tmux::{TmuxCommandRunner, TmuxError};

#[derive(Debug, Clone)]
pub struct FakePane {
    pub id: u32,
}

#[derive(Debug, Clone)]
pub struct FakeWindow {
    pub id: u32,
    pub name: String,
    pub index: u32,
    pub dir: Option<String>,
    pub layout: Option<String>,
    pub panes: Vec<FakePane>,
}

#[derive(Debug, Clone)]
pub struct FakeSession {
    pub id: u32,
    pub name: String,
    pub windows: Vec<FakeWindow>,
}

#[derive(Debug, Default)]
pub struct State {
    pub sessions: Vec<FakeSession>,
    next_session: u32,
    next_window: u32,
    next_pane: u32,
    pub calls: Vec<Vec<String>>,
    pub attached: Vec<String>,
    /// Splits that create the pane but still report "already exists".
    pub split_reports_exists: usize,
    /// stderr for splits that fail outright.
    pub split_failure: Option<String>,
    pub layout_failure: Option<String>,
}

#[derive(Default)]
pub struct FakeTmux {
    pub state: Mutex<State>,
}

impl FakeTmux {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c[0].clone()).collect()
    }

    pub fn attached(&self) -> Vec<String> {
        self.state.lock().unwrap().attached.clone()
    }

    pub fn sessions(&self) -> Vec<FakeSession> {
        self.state.lock().unwrap().sessions.clone()
    }
}

fn flag<'a>(args: &[&'a str], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| *a == name)
        .and_then(|i| args.get(i + 1).copied())
}

fn failed(args: &[&str], stderr: &str) -> TmuxError {
    TmuxError::CommandFailed {
        command: args.join(" "),
        code: 1,
        stderr: stderr.to_string(),
    }
}

fn window_line(s: &FakeSession, w: &FakeWindow) -> String {
    format!("${}:{}:@{}:{}:{}\n", s.id, s.name, w.id, w.name, w.index)
}

fn pane_lines(s: &FakeSession, w: &FakeWindow) -> String {
    w.panes
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let active = if idx + 1 == w.panes.len() { 1 } else { 0 };
            format!(
                "${}:{}:@{}:{}:{}:%{}:{}:{}\n",
                s.id, s.name, w.id, w.name, w.index, p.id, active, idx
            )
        })
        .collect()
}

impl State {
    fn new_pane(&mut self) -> FakePane {
        let pane = FakePane { id: self.next_pane };
        self.next_pane += 1;
        pane
    }

    fn new_window(&mut self, name: &str, index: u32, dir: Option<&str>) -> FakeWindow {
        let pane = self.new_pane();
        let window = FakeWindow {
            id: self.next_window,
            name: name.to_string(),
            index,
            dir: dir.map(str::to_string),
            layout: None,
            panes: vec![pane],
        };
        self.next_window += 1;
        window
    }

    fn session_idx(&self, target: &str) -> Option<usize> {
        let target = target.trim_end_matches(':');
        self.sessions.iter().position(|s| {
            format!("${}", s.id) == target || s.name == target || format!("={}", s.name) == target
        })
    }

    fn window_idx(&self, target: &str) -> Option<(usize, usize)> {
        for (si, s) in self.sessions.iter().enumerate() {
            for (wi, w) in s.windows.iter().enumerate() {
                if format!("@{}", w.id) == target || format!("{}:{}", s.name, w.name) == target {
                    return Some((si, wi));
                }
            }
        }
        None
    }

    fn handle(&mut self, args: &[&str]) -> Result<String, TmuxError> {
        match args[0] {
            "new-session" => {
                let name = flag(args, "-s").unwrap_or("0");
                if self.sessions.iter().any(|s| s.name == name) {
                    return Err(failed(args, &format!("duplicate session: {}", name)));
                }
                let window_name = flag(args, "-n").unwrap_or("bash");
                let window = self.new_window(window_name, 0, flag(args, "-c"));
                let session = FakeSession {
                    id: self.next_session,
                    name: name.to_string(),
                    windows: vec![window],
                };
                self.next_session += 1;
                let line = window_line(&session, &session.windows[0]);
                self.sessions.push(session);
                Ok(line)
            }
            "new-window" => {
                let target = flag(args, "-t").unwrap_or_default();
                let si = self
                    .session_idx(target)
                    .ok_or_else(|| failed(args, &format!("can't find session: {}", target)))?;
                let windows = &self.sessions[si].windows;
                let index = windows.iter().map(|w| w.index + 1).max().unwrap_or(0);
                let window_name = flag(args, "-n").unwrap_or("bash");
                let window = self.new_window(window_name, index, flag(args, "-c"));
                let line = window_line(&self.sessions[si], &window);
                self.sessions[si].windows.push(window);
                Ok(line)
            }
            "split-window" => {
                if let Some(stderr) = self.split_failure.clone() {
                    return Err(failed(args, &stderr));
                }
                let target = flag(args, "-t").unwrap_or_default();
                let (si, wi) = self
                    .window_idx(target)
                    .ok_or_else(|| failed(args, &format!("can't find window: {}", target)))?;
                let pane = self.new_pane();
                let id = pane.id;
                self.sessions[si].windows[wi].panes.push(pane);
                if self.split_reports_exists > 0 {
                    self.split_reports_exists -= 1;
                    return Err(failed(args, "create pane failed: pane already exists"));
                }
                Ok(format!("%{}\n", id))
            }
            "list-panes" => {
                if args.contains(&"-a") {
                    let mut out = String::new();
                    for s in &self.sessions {
                        for w in &s.windows {
                            out.push_str(&pane_lines(s, w));
                        }
                    }
                    return Ok(out);
                }
                let target = flag(args, "-t").unwrap_or_default();
                if args.contains(&"-s") {
                    let si = self
                        .session_idx(target)
                        .ok_or_else(|| failed(args, &format!("can't find session: {}", target)))?;
                    let s = &self.sessions[si];
                    return Ok(s.windows.iter().map(|w| pane_lines(s, w)).collect());
                }
                let (si, wi) = self
                    .window_idx(target)
                    .ok_or_else(|| failed(args, &format!("can't find window: {}", target)))?;
                let s = &self.sessions[si];
                Ok(pane_lines(s, &s.windows[wi]))
            }
            "select-layout" => {
                if let Some(stderr) = self.layout_failure.clone() {
                    return Err(failed(args, &stderr));
                }
                let target = flag(args, "-t").unwrap_or_default();
                let (si, wi) = self
                    .window_idx(target)
                    .ok_or_else(|| failed(args, &format!("can't find window: {}", target)))?;
                self.sessions[si].windows[wi].layout = args.last().map(|l| l.to_string());
                Ok(String::new())
            }
            "attach-session" | "switch-client" => {
                let target = flag(args, "-t").unwrap_or_default();
                self.session_idx(target)
                    .ok_or_else(|| failed(args, &format!("can't find session: {}", target)))?;
                self.attached.push(target.to_string());
                Ok(String::new())
            }
            _ => Ok(String::new()),
        }
    }
}

impl TmuxCommandRunner for FakeTmux {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(args.iter().map(|a| a.to_string()).collect());
        state.handle(args)
    }
}
