use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::roles::Role;
use crate::errors::domain::{DomainError, ValidationKind};

/// Opaque participant identifier, unique within a room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Room identifier; one session per room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Behavioral profile driving a synthetic participant's decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Goes after known threats first.
    Aggressive,
    /// Avoids known quantities and follows the crowd.
    Cautious,
    /// Weighs round number and survivor count before spending resources.
    Strategic,
    /// Uniform choice among legal targets.
    Baseline,
}

impl Profile {
    pub const ALL: [Profile; 4] = [
        Profile::Aggressive,
        Profile::Cautious,
        Profile::Strategic,
        Profile::Baseline,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Profile::Aggressive => "aggressive",
            Profile::Cautious => "cautious",
            Profile::Strategic => "strategic",
            Profile::Baseline => "baseline",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aggressive" => Ok(Profile::Aggressive),
            "cautious" => Ok(Profile::Cautious),
            "strategic" => Ok(Profile::Strategic),
            "baseline" | "random" => Ok(Profile::Baseline),
            other => Err(DomainError::validation(
                ValidationKind::Other("UNKNOWN_PROFILE".into()),
                format!("unknown profile '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActorKind {
    Human,
    Synthetic { profile: Profile },
}

impl ActorKind {
    #[inline]
    pub fn is_synthetic(&self) -> bool {
        matches!(self, ActorKind::Synthetic { .. })
    }

    pub fn profile(&self) -> Option<Profile> {
        match self {
            ActorKind::Human => None,
            ActorKind::Synthetic { profile } => Some(*profile),
        }
    }
}

/// One seat in a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub kind: ActorKind,
    /// Seat order is roster order and stays stable for the session.
    pub seat: u8,
    /// Assigned once at start; see [`Participant::role`].
    role: Option<Role>,
    pub alive: bool,
    pub lover: bool,
}

impl Participant {
    pub fn human(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_kind(ParticipantId::new(id), name.into(), ActorKind::Human)
    }

    pub fn synthetic(id: impl Into<String>, name: impl Into<String>, profile: Profile) -> Self {
        Self::with_kind(
            ParticipantId::new(id),
            name.into(),
            ActorKind::Synthetic { profile },
        )
    }

    fn with_kind(id: ParticipantId, name: String, kind: ActorKind) -> Self {
        Self {
            id,
            name,
            kind,
            seat: 0,
            role: None,
            alive: true,
            lover: false,
        }
    }

    /// Role, once dealt. `None` only before the session starts.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_wolf_aligned(&self) -> bool {
        self.role.is_some_and(Role::is_wolf_aligned)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }

    pub(crate) fn assign_role(&mut self, role: Role) -> Result<(), DomainError> {
        if let Some(existing) = self.role {
            return Err(DomainError::validation(
                ValidationKind::Other("ROLE_ALREADY_ASSIGNED".into()),
                format!("{} already holds role {existing}", self.id),
            ));
        }
        self.role = Some(role);
        Ok(())
    }
}
