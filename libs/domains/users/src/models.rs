use sea_orm::{DeriveActiveEnum, EnumIter, sea_query::StringLen};
use serde::{Deserialize, Deserializer, Serialize, de};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

/// Account role chosen at registration and confirmed at login.
///
/// Serialized upper-case. Parsing ignores ASCII case, and `DRIVER` is read as
/// [`Role::User`].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
#[strum(ascii_case_insensitive)]
pub enum Role {
    /// A driver looking for parking
    #[default]
    #[sea_orm(string_value = "USER")]
    #[strum(to_string = "USER", serialize = "DRIVER")]
    User,
    /// Operates one or more parking lots
    #[sea_orm(string_value = "OWNER")]
    #[strum(serialize = "OWNER")]
    Owner,
    #[sea_orm(string_value = "ADMIN")]
    #[strum(serialize = "ADMIN")]
    Admin,
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim().parse().map_err(|_| {
            de::Error::unknown_variant(&raw, &["USER", "OWNER", "ADMIN", "DRIVER"])
        })
    }
}

/// Stored user record.
///
/// `password` holds the Argon2 PHC string, never the plaintext. Use
/// [`UserResponse`] for anything sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub role: Role,
}

/// A user about to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub role: Role,
}

impl NewUser {
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            phone: self.phone,
            role: self.role,
        }
    }
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
        }
    }
}

/// DTO for user registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Ana")]
    pub name: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(email, length(max = 255))]
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    #[schema(example = "secret")]
    pub password: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 32))]
    #[schema(example = "555-1234")]
    pub phone: String,
    pub role: Role,
}

/// DTO for user login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email, length(max = 255))]
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    pub role: Role,
}

/// Response after successful login/register
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// Signed HS256 access token
    pub token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Seconds until `token` expires
    pub expires_in: i64,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn bearer(token: String, expires_in: i64, user: UserResponse) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// Strip surrounding whitespace before validation sees the value.
fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

/// Canonical form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
