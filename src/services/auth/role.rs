//! Role name validation for the registration flow.
//!
//! Rules, applied in this order:
//! - missing / blank -> `student`
//! - trimmed value equal to `admin` (any casing) -> `ReservedName`
//! - trimmed value longer than 32 characters -> `TooLong`
//! - otherwise the trimmed value, case preserved
use thiserror::Error;

pub const DEFAULT_ROLE: &str = "student";
pub const RESERVED_ROLE: &str = "admin";
pub const MAX_ROLE_NAME_CHARS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoleError {
    #[error("Role name can not be admin")]
    ReservedName,

    #[error("Role name can not be longer than 32 chars")]
    TooLong,
}

/// A role name that passed [`normalize`]. Only constructible through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleName(String);

impl RoleName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

pub fn normalize(raw: Option<&str>) -> Result<RoleName, RoleError> {
    let trimmed = match raw.map(str::trim) {
        None | Some("") => return Ok(RoleName(DEFAULT_ROLE.to_string())),
        Some(v) => v,
    };

    if trimmed.eq_ignore_ascii_case(RESERVED_ROLE) {
        return Err(RoleError::ReservedName);
    }

    if trimmed.chars().count() > MAX_ROLE_NAME_CHARS {
        return Err(RoleError::TooLong);
    }

    Ok(RoleName(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_blank_falls_back_to_student() {
        for raw in [None, Some(""), Some("   "), Some("\t\n ")] {
            let role = normalize(raw).unwrap();
            assert_eq!(role.as_str(), "student", "input: {raw:?}");
        }
    }

    #[test]
    fn admin_is_reserved_in_any_casing() {
        for raw in ["admin", "ADMIN", "Admin", "  aDmIn  ", "\tadmin\n"] {
            assert_eq!(normalize(Some(raw)), Err(RoleError::ReservedName), "input: {raw:?}");
        }
    }

    #[test]
    fn too_long_after_trim_is_rejected() {
        let raw = format!("  {}  ", "x".repeat(33));
        assert_eq!(normalize(Some(&raw)), Err(RoleError::TooLong));

        let raw = "r".repeat(40);
        assert_eq!(normalize(Some(&raw)), Err(RoleError::TooLong));
    }

    #[test]
    fn exactly_32_chars_is_accepted() {
        let raw = "y".repeat(32);
        assert_eq!(normalize(Some(&raw)).unwrap().as_str(), raw);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let raw = "é".repeat(32);
        assert_eq!(normalize(Some(&raw)).unwrap().as_str(), raw);
    }

    #[test]
    fn trims_and_preserves_case() {
        let role = normalize(Some("  Angel ")).unwrap();
        assert_eq!(role.as_str(), "Angel");
    }

    #[test]
    fn admin_lookalikes_are_not_reserved() {
        for raw in ["admins", "super admin", "ad min"] {
            assert_eq!(normalize(Some(raw)).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn error_messages_match_client_contract() {
        assert_eq!(RoleError::ReservedName.to_string(), "Role name can not be admin");
        assert_eq!(
            RoleError::TooLong.to_string(),
            "Role name can not be longer than 32 chars"
        );
    }
}
