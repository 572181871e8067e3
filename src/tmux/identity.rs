use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::TmuxError;

/// Identity of a tmux entity.
///
/// An entity declared in a configuration starts out `Speculative` (name only)
/// and is promoted to `Realized` once tmux has actually created it. Promotion
/// happens at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Id {
    #[default]
    Speculative,
    Realized(u32),
}

impl Id {
    pub fn get(self) -> Option<u32> {
        match self {
            Id::Speculative => None,
            Id::Realized(id) => Some(id),
        }
    }

    pub fn is_realized(self) -> bool {
        matches!(self, Id::Realized(_))
    }

    /// Bind to the id tmux reported. Fails if already bound.
    pub(crate) fn promote(
        &mut self,
        id: u32,
        entity: &'static str,
        name: &str,
    ) -> Result<(), TmuxError> {
        if self.is_realized() {
            return Err(TmuxError::AlreadyRealized {
                entity,
                name: name.to_string(),
            });
        }
        *self = Id::Realized(id);
        Ok(())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Speculative => f.write_str("?"),
            Id::Realized(id) => write!(f, "{}", id),
        }
    }
}
