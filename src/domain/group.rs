//! Household groups and the invite codes used to join them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::errors::TogetherError;

pub const INVITE_CODE_LEN: usize = 6;

/// Six character join code. Stored upper-case; user input is normalized on parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InviteCode(String);

impl InviteCode {
    pub fn parse(raw: &str) -> Result<Self, TogetherError> {
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.len() != INVITE_CODE_LEN
            || !normalized.chars().all(|ch| ch.is_ascii_alphanumeric())
        {
            return Err(TogetherError::InvalidInviteCode(raw.trim().to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for InviteCode {
    type Err = TogetherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for InviteCode {
    type Error = TogetherError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<InviteCode> for String {
    fn from(code: InviteCode) -> Self {
        code.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The household unit sharing one ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub invite_code: InviteCode,
}

impl Group {
    pub fn new(name: impl Into<String>, invite_code: InviteCode) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            invite_code,
        }
    }
}

impl Identifiable for Group {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Group {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_codes_are_normalized_to_upper_case() {
        let code = InviteCode::parse(" ab12cd ").unwrap();
        assert_eq!(code.as_str(), "AB12CD");
    }

    #[test]
    fn invite_codes_reject_bad_length_and_symbols() {
        assert!(InviteCode::parse("ABC12").is_err());
        assert!(InviteCode::parse("ABC1234").is_err());
        assert!(matches!(
            InviteCode::parse("AB-12C"),
            Err(TogetherError::InvalidInviteCode(_))
        ));
    }

    #[test]
    fn invite_code_deserialization_validates() {
        let ok: InviteCode = serde_json::from_str("\"xy98zz\"").unwrap();
        assert_eq!(ok.to_string(), "XY98ZZ");
        assert!(serde_json::from_str::<InviteCode>("\"nope\"").is_err());
    }
}
