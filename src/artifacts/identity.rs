//! Who is committing, and when
//!
//! The commit path never reads the environment or the system clock by itself: it is
//! handed an [`IdentityProvider`] and a [`Clock`]. The environment-backed
//! implementations here are what the binary wires in.
//!
//! ## Environment
//!
//! - `GIT_AUTHOR_NAME`, `GIT_AUTHOR_EMAIL`: required by [`EnvIdentity`]
//! - `GIT_AUTHOR_DATE`: pins the clock (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`)

use crate::artifacts::objects::error::{ObjectError, ObjectResult};
use anyhow::Context;
use chrono::{DateTime, FixedOffset};
use derive_new::new;

pub const AUTHOR_NAME_VAR: &str = "GIT_AUTHOR_NAME";
pub const AUTHOR_EMAIL_VAR: &str = "GIT_AUTHOR_EMAIL";
pub const AUTHOR_DATE_VAR: &str = "GIT_AUTHOR_DATE";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// Reject values that cannot be written into an `author`/`committer` line
    ///
    /// `<` and `>` delimit the email and a newline would start a new header.
    pub fn validate(&self) -> ObjectResult<()> {
        for (field, value) in [("name", &self.name), ("email", &self.email)] {
            if value.contains(['<', '>', '\n', '\0']) {
                return Err(ObjectError::invalid_input(format!(
                    "author {field} {value:?} must not contain '<', '>', newlines or NUL"
                )));
            }
        }

        Ok(())
    }
}

pub trait IdentityProvider {
    fn identity(&self) -> anyhow::Result<Identity>;
}

pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

impl IdentityProvider for Identity {
    fn identity(&self) -> anyhow::Result<Identity> {
        Ok(self.clone())
    }
}

/// Identity read from `GIT_AUTHOR_NAME` and `GIT_AUTHOR_EMAIL` on every call
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvIdentity;

impl IdentityProvider for EnvIdentity {
    fn identity(&self) -> anyhow::Result<Identity> {
        let name = std::env::var(AUTHOR_NAME_VAR).context(format!("{AUTHOR_NAME_VAR} not set"))?;
        let email =
            std::env::var(AUTHOR_EMAIL_VAR).context(format!("{AUTHOR_EMAIL_VAR} not set"))?;

        Ok(Identity::new(name, email))
    }
}

/// Local wall-clock time with the local UTC offset
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        chrono::Local::now().fixed_offset()
    }
}

#[derive(Debug, Clone, Copy, new)]
pub struct FixedClock {
    timestamp: DateTime<FixedOffset>,
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }
}

pub fn parse_date(date: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(date)
        .or_else(|_| DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z"))
        .ok()
}

/// A fixed clock when `GIT_AUTHOR_DATE` holds a parseable date, the system clock otherwise
pub fn clock_from_env() -> Box<dyn Clock> {
    match std::env::var(AUTHOR_DATE_VAR) {
        Ok(date) => match parse_date(&date) {
            Some(timestamp) => Box::new(FixedClock::new(timestamp)),
            None => {
                tracing::warn!(%date, "ignoring unparseable {AUTHOR_DATE_VAR}");
                Box::new(SystemClock)
            }
        },
        Err(_) => Box::new(SystemClock),
    }
}
