//! User roles issued by the backend at login.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_FARMER: &str = "farmer";
pub const ROLE_MILL: &str = "mill";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_REPORT: &str = "report";

/// Role attached to an account; decides which screens a session may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Farmer,
    Mill,
    Admin,
    Report,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Farmer => ROLE_FARMER,
            Self::Mill => ROLE_MILL,
            Self::Admin => ROLE_ADMIN,
            Self::Report => ROLE_REPORT,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_FARMER => Ok(Self::Farmer),
            ROLE_MILL => Ok(Self::Mill),
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_REPORT => Ok(Self::Report),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_form_round_trips_for_every_role() {
        for role in [
            UserRole::Farmer,
            UserRole::Mill,
            UserRole::Admin,
            UserRole::Report,
        ] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Mill).unwrap(), "\"mill\"");
    }

    #[test]
    fn unknown_role_is_a_validation_error() {
        assert!(matches!(
            "superuser".parse::<UserRole>(),
            Err(CoreError::Validation(_))
        ));
    }
}
