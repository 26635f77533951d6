use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Right {
    ManageProducts,
}

impl Right {
    pub fn as_str(self) -> &'static str {
        match self {
            Right::ManageProducts => "manageProducts",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Missing or unrecognised role names fall back to `User`.
    pub fn from_claim(role: Option<&str>) -> Self {
        match role {
            Some("admin") => Role::Admin,
            _ => Role::User,
        }
    }

    pub fn rights(self) -> &'static [Right] {
        match self {
            Role::User => &[],
            Role::Admin => &[Right::ManageProducts],
        }
    }
}

/// Fail with 403 unless `role` grants `right`.
pub fn require_right(role: Role, right: Right) -> Result<(), ApiError> {
    if role.rights().contains(&right) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "Missing required right: {}",
            right.as_str()
        )))
    }
}
