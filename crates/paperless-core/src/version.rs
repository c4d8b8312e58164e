//! Paperless server version, as reported in the `x-version` response header.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Dotted numeric version with two to four components. Missing components compare as zero.
#[derive(Debug, Clone, Copy)]
pub struct ServerVersion {
    parts: [u32; 4],
    len: usize,
}

impl ServerVersion {
    /// Last version whose upload endpoint did not return the import task id.
    pub const LAST_WITHOUT_TASK_ID: ServerVersion = ServerVersion::new(1, 9, 2);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            parts: [major, minor, patch, 0],
            len: 3,
        }
    }

    pub fn major(&self) -> u32 {
        self.parts[0]
    }

    pub fn minor(&self) -> u32 {
        self.parts[1]
    }

    pub fn patch(&self) -> u32 {
        self.parts[2]
    }

    /// Whether the upload endpoint of this version answers with the import task id.
    pub fn returns_task_id(&self) -> bool {
        *self > Self::LAST_WITHOUT_TASK_ID
    }
}

impl FromStr for ServerVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components: Vec<&str> = s.trim().split('.').collect();
        if !(2..=4).contains(&components.len()) {
            return Err(format!("Invalid version: {}", s));
        }

        let mut parts = [0u32; 4];
        for (slot, component) in parts.iter_mut().zip(&components) {
            *slot = component
                .parse()
                .map_err(|_| format!("Invalid version: {}", s))?;
        }

        Ok(Self {
            parts,
            len: components.len(),
        })
    }
}

impl PartialEq for ServerVersion {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl Eq for ServerVersion {}

impl Ord for ServerVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts.cmp(&other.parts)
    }
}

impl PartialOrd for ServerVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for ServerVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let rendered: Vec<String> = self.parts[..self.len]
            .iter()
            .map(u32::to_string)
            .collect();
        write!(f, "{}", rendered.join("."))
    }
}
