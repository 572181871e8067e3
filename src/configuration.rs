//! Declarative setup of sessions, windows and panes on a tmux server.

use crate::tmux::{Server, Session, TmuxError};

/// Sessions to create on `server`, in order.
///
/// [`Configuration::apply`] promotes every declared entity in place as tmux
/// creates it. There is no rollback: when apply fails, whatever was created
/// before the failing step stays created and is visible here.
#[derive(Debug, Default)]
pub struct Configuration {
    pub server: Option<Server>,
    pub sessions: Vec<Session>,
    /// Index into `sessions` of the session to attach after creating it.
    /// `None` leaves every session detached.
    pub active_session: Option<usize>,
}

impl Configuration {
    pub fn new(server: Server) -> Self {
        Self {
            server: Some(server),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.sessions.push(session);
        self
    }

    /// Declare `session` and return its index (usable as `active_session`).
    pub fn add_session(&mut self, session: Session) -> usize {
        self.sessions.push(session);
        self.sessions.len() - 1
    }

    pub fn active(&self) -> Option<&Session> {
        self.active_session.and_then(|idx| self.sessions.get(idx))
    }

    /// Create every declared session, window and pane.
    ///
    /// The caller must make sure no session with a declared name exists yet.
    pub fn apply(&mut self) -> Result<(), TmuxError> {
        let Configuration {
            server,
            sessions,
            active_session,
        } = self;
        let server = validate(server.as_ref(), sessions, *active_session)?;

        for (idx, session) in sessions.iter_mut().enumerate() {
            apply_session(server, session, *active_session == Some(idx))?;
        }

        Ok(())
    }

    /// Like [`Configuration::apply`], but attaches to the active session only
    /// once everything is created. An interactive `attach-session` blocks
    /// until the user detaches, so it can't run in the middle of setup.
    /// Nested clients switch without blocking and keep the regular order.
    pub fn apply_then_attach(&mut self) -> Result<(), TmuxError> {
        validate(self.server.as_ref(), &self.sessions, self.active_session)?;
        if self.server.as_ref().is_some_and(Server::is_nested) {
            return self.apply();
        }

        let active = self.active_session.take();
        let result = self.apply();
        self.active_session = active;
        result?;

        if let (Some(server), Some(session)) = (self.server.as_ref(), self.active()) {
            tracing::info!(session = %session.name, "attaching");
            session.attach(server)?;
        }
        Ok(())
    }
}

/// Checks run before anything is sent to tmux.
fn validate<'a>(
    server: Option<&'a Server>,
    sessions: &[Session],
    active_session: Option<usize>,
) -> Result<&'a Server, TmuxError> {
    let server = server.ok_or(TmuxError::NoServer)?;

    if sessions.is_empty() {
        return Err(TmuxError::NoSessions);
    }

    if let Some(session) = sessions.iter().find(|s| s.windows.is_empty()) {
        return Err(TmuxError::EmptySession {
            session: session.name.clone(),
        });
    }

    if let Some(index) = active_session {
        if index >= sessions.len() {
            return Err(TmuxError::UnknownActiveSession { index });
        }
    }

    Ok(server)
}

fn apply_session(server: &Server, session: &mut Session, attach: bool) -> Result<(), TmuxError> {
    // tmux creates one window with one pane along with the session. Declared
    // windows named like the first one map onto that window instead of new ones.
    let initial_name = session.windows[0].name.clone();
    let created = server.new_session(
        &session.name,
        Some(initial_name.as_str()),
        session.start_directory.as_deref(),
    )?;
    session.realize(&created)?;

    if attach {
        tracing::info!(session = %session.name, "attaching");
        session.attach(server)?;
    }

    let target = session.target();
    let initial = created.windows.into_iter().next();

    for window in session.windows.iter_mut() {
        if window.start_directory.is_none() {
            window.start_directory = session.start_directory.clone();
        }

        let realized = match initial {
            Some(ref first) if window.name == initial_name => first.clone(),
            _ => server.new_window(&target, &window.name, window.start_directory.as_deref())?,
        };
        window.realize(&realized)?;
        window.session_name = session.name.clone();
        window.session_id = session.id;

        let desired = window.panes.len();
        window.panes = window.list_panes(server)?;
        for pane_idx in 1..desired {
            let pane = window.split_pane(server)?;
            tracing::debug!(window = %window.name, pane = %pane.id, "split");
            if pane_idx < window.panes.len() {
                window.panes[pane_idx] = pane;
            } else {
                window.panes.push(pane);
            }
        }

        if let Some(layout) = window.layout {
            window.select_layout(server, layout)?;
        }

        tracing::info!(
            session = %session.name,
            window = %window.name,
            panes = window.panes.len(),
            "window ready"
        );
    }

    Ok(())
}
