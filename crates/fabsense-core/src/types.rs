use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of one conversation session, e.g. `demo-session-1706193015000`.
///
/// Formed from a configurable prefix and the session start time in epoch
/// milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate(prefix: &str) -> Self {
        Self::at(prefix, Utc::now())
    }

    pub fn at(prefix: &str, started_at: DateTime<Utc>) -> Self {
        Self(format!("{}{}", prefix, started_at.timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
