pub mod delete_user;
pub mod get_me;
pub mod get_user;
pub mod list_users;
pub mod login;
pub mod register_user;
pub mod update_user;

pub use delete_user::delete_user;
pub use get_me::get_me;
pub use get_user::get_user;
pub use list_users::list_users;
pub use login::login;
pub use register_user::register_user;
use serde::Serialize;
pub use update_user::update_user;

use crate::domain::user::models::User;
use crate::domain::user::models::UserProfile;

/// User joined with its role name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfileData {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&UserProfile> for UserProfileData {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.0,
            name: profile.name.as_str().to_string(),
            email: profile.email.as_str().to_string(),
            role: profile.role.as_str().to_string(),
        }
    }
}

/// Stored user without its password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role_id: i32,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role_id: user.role_id.0,
        }
    }
}
