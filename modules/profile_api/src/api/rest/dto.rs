use serde::{Deserialize, Serialize};

use crate::domain::model::{Profile, UserIdentity};

/// Fixed value of `ProfileResponse.status`.
pub const STATUS_SUCCESS: &str = "success";

/// Wire payload of `GET /me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub status: String,
    pub user: UserIdentityDto,
    pub timestamp: String,
    pub fact: String,
}

/// REST DTO for the static identity block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentityDto {
    pub email: String,
    pub name: String,
    pub stack: String,
}

impl From<UserIdentity> for UserIdentityDto {
    fn from(user: UserIdentity) -> Self {
        Self {
            email: user.email,
            name: user.name,
            stack: user.stack,
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            user: profile.user.into(),
            timestamp: profile.timestamp,
            fact: profile.fact,
        }
    }
}
