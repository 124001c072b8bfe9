use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// Accepts `local-part@domain.tld` with dot/dash separated word segments.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").unwrap());

/// User entity - represents a user document stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address, unique across all users
    pub email: String,
    /// Age in years
    pub age: Option<i32>,
    /// Postal address
    pub address: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    #[validate(regex(path = *EMAIL_PATTERN, message = "Please enter a valid email"))]
    pub email: String,
    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: Option<i32>,
    pub address: Option<String>,
}

/// DTO for partially updating an existing user.
///
/// Absent fields leave the stored values untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(regex(path = *EMAIL_PATTERN, message = "Please enter a valid email"))]
    pub email: Option<String>,
    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: Option<i32>,
    pub address: Option<String>,
}

impl CreateUser {
    /// Trim surrounding whitespace and lowercase the email.
    ///
    /// Runs before validation so the rules see canonical values, the same
    /// order a schema with field setters would apply.
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        if let Some(address) = self.address.take() {
            self.address = Some(address.trim().to_string());
        }
    }

    /// Whether both mandatory fields carry a non-empty value.
    pub fn has_required_fields(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }
}

impl UpdateUser {
    /// Trim surrounding whitespace and lowercase the email on every field
    /// present in the payload.
    pub fn normalize(&mut self) {
        if let Some(name) = self.name.take() {
            self.name = Some(name.trim().to_string());
        }
        if let Some(email) = self.email.take() {
            self.email = Some(email.trim().to_lowercase());
        }
        if let Some(address) = self.address.take() {
            self.address = Some(address.trim().to_string());
        }
    }

    /// True when the payload carries no applicable field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none() && self.address.is_none()
    }
}

impl User {
    /// Create a new user from a validated CreateUser DTO.
    ///
    /// The identifier and both timestamps are assigned here, never by the
    /// client.
    pub fn new(input: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            age: input.age,
            address: input.address,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields present in an UpdateUser DTO and refresh
    /// `updated_at`.
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        self.updated_at = Utc::now();
    }
}

/// Flatten validator output into one message per failed rule.
///
/// Sorted so the list is stable regardless of field iteration order.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages
}
