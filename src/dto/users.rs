use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Role, User};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub user_email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

/// Signup either inserts the record or reports the existing account; a
/// duplicate call never mutates anything.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum SignupResponse {
    Created(User),
    AlreadyExists {
        message: String,
        #[serde(rename = "insertedId")]
        inserted_id: Option<String>,
    },
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeRoleRequest {
    pub user_email: String,
    pub role: Role,
}
