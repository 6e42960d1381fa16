//! ISO-8601 expiration durations (`PT2M`, `PT1H30M`, ...)

use serde::{Serialize, Serializer};
use std::time::Duration;

/// How long a preferred presence stays in effect before the remote service drops it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationDuration(Duration);

impl ExpirationDuration {
    /// Create from a duration. Sub-second precision is truncated.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self(Duration::from_secs(duration.as_secs()))
    }

}

impl std::fmt::Display for ExpirationDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total = self.0.as_secs();
        let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

        f.write_str("PT")?;
        if total == 0 {
            return f.write_str("0S");
        }
        if hours > 0 {
            write!(f, "{hours}H")?;
        }
        if minutes > 0 {
            write!(f, "{minutes}M")?;
        }
        if seconds > 0 {
            write!(f, "{seconds}S")?;
        }
        Ok(())
    }
}

impl From<Duration> for ExpirationDuration {
    fn from(duration: Duration) -> Self {
        Self::new(duration)
    }
}

impl Serialize for ExpirationDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
