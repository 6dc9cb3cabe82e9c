//! Session state: which member the client is acting as.
//!
//! There is no real authentication. The selected member id is persisted
//! to a small TOML file next to the config and restored at startup with
//! a roster membership check; an unknown id just means no one is
//! selected.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{HuddleError, HuddleResult};
use crate::member::Member;

#[derive(Serialize, Deserialize, Default)]
struct SessionFile {
    active_member: Option<String>,
}

/// Holder for the acting member, persisted across runs.
pub struct Session {
    path: PathBuf,
    active: RwLock<Option<Member>>,
}

impl Session {
    /// Load the session from the default location.
    pub fn load() -> HuddleResult<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| HuddleError::Config("Could not determine config directory".into()))?
            .join("huddle");

        Self::load_from(dir.join("session.toml"))
    }

    /// Load the session from an explicit path.
    pub fn load_from(path: PathBuf) -> HuddleResult<Self> {
        let active = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let file: SessionFile = toml::from_str(&contents)
                    .map_err(|e| HuddleError::Serialization(e.to_string()))?;
                file.active_member.as_deref().and_then(Member::find)
            }
            Err(_) => None,
        };

        Ok(Session {
            path,
            active: RwLock::new(active),
        })
    }

    /// The member currently acting, if any.
    pub fn active(&self) -> Option<Member> {
        self.active.read().expect("session lock poisoned").clone()
    }

    /// Select the acting member and persist the choice.
    pub fn set_active(&self, member: Member) -> HuddleResult<()> {
        let file = SessionFile {
            active_member: Some(member.id.clone()),
        };
        self.persist(&file)?;
        *self.active.write().expect("session lock poisoned") = Some(member);
        Ok(())
    }

    /// Clear the selection and persist.
    pub fn clear(&self) -> HuddleResult<()> {
        self.persist(&SessionFile::default())?;
        *self.active.write().expect("session lock poisoned") = None;
        Ok(())
    }

    fn persist(&self, file: &SessionFile) -> HuddleResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents =
            toml::to_string(file).map_err(|e| HuddleError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Path the session is persisted at.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_active_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        let session = Session::load_from(path.clone()).unwrap();
        assert!(session.active().is_none());

        session.set_active(Member::find("kiana").unwrap()).unwrap();
        assert_eq!(session.active().unwrap().id, "kiana");

        let reloaded = Session::load_from(path).unwrap();
        assert_eq!(reloaded.active().unwrap().id, "kiana");
    }

    #[test]
    fn unknown_member_id_falls_back_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "active_member = \"stranger\"\n").unwrap();

        let session = Session::load_from(path).unwrap();
        assert!(session.active().is_none());
    }

    #[test]
    fn clear_removes_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        let session = Session::load_from(path.clone()).unwrap();
        session.set_active(Member::find("ben").unwrap()).unwrap();
        session.clear().unwrap();
        assert!(session.active().is_none());

        let reloaded = Session::load_from(path).unwrap();
        assert!(reloaded.active().is_none());
    }
}
