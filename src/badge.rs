use crate::style::Role;
use crate::BadgeError;
use serde::Deserialize;
use std::path::Path;

/// Badges have room for this many session codes
pub const SESSION_SLOTS: usize = 6;

/// One person's badge. Built once and then only read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BadgeRecord {
    name: String,
    #[serde(default, alias = "organization")]
    organisation: String,
    #[serde(default)]
    role: Role,
    #[serde(default)]
    sessions: Vec<String>,
}

impl BadgeRecord {
    pub fn new<N: ToString, O: ToString>(name: N, organisation: O, role: Role) -> BadgeRecord {
        BadgeRecord {
            name: name.to_string(),
            organisation: organisation.to_string(),
            role,
            sessions: Vec::new(),
        }
    }

    /// Attach session codes. Only the first [SESSION_SLOTS] are kept.
    pub fn with_sessions<I, S>(mut self, sessions: I) -> BadgeRecord
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.sessions = sessions.into_iter().map(|s| s.to_string()).collect();
        self.truncate_sessions();
        self
    }

    fn truncate_sessions(&mut self) {
        if self.sessions.len() > SESSION_SLOTS {
            log::warn!(
                "badge for {:?} lists {} sessions, keeping the first {SESSION_SLOTS}",
                self.name,
                self.sessions.len()
            );
            self.sessions.truncate(SESSION_SLOTS);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn organisation(&self) -> &str {
        &self.organisation
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn sessions(&self) -> &[String] {
        &self.sessions
    }

    /// The session code for a slot, if one was given
    pub fn session(&self, slot: usize) -> Option<&str> {
        self.sessions.get(slot).map(String::as_str)
    }
}

/// Parse a JSON array of badge records
pub fn parse_records(json: &str) -> Result<Vec<BadgeRecord>, BadgeError> {
    let mut records: Vec<BadgeRecord> = serde_json::from_str(json)?;
    for record in records.iter_mut() {
        record.truncate_sessions();
    }
    Ok(records)
}

/// Read a JSON array of badge records from disk
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<BadgeRecord>, BadgeError> {
    let json = std::fs::read_to_string(path.as_ref())?;
    let records = parse_records(&json)?;
    log::info!(
        "loaded {} badge records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Filler badges for proofing a sheet layout: four-word lorem ipsum names, all
/// from the same organisation, cycling through the roles. The same `count`
/// always gives the same badges.
pub fn sample_records(count: usize, organisation: &str) -> Vec<BadgeRecord> {
    let words: Vec<&str> = lipsum::LOREM_IPSUM
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect();

    (0..count)
        .map(|i| {
            let name = (0..4)
                .map(|k| words[(i * 4 + k) % words.len()])
                .collect::<Vec<_>>()
                .join(" ");
            let role = Role::ALL[i % Role::ALL.len()];
            BadgeRecord::new(name, organisation, role)
        })
        .collect()
}
