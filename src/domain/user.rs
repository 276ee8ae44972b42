//! User domain entity.
//! Customers book spaces; staff and admins manage them on a customer's
//! behalf. Authentication lives outside this core.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Customer,
    Staff,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub role: UserRole,
}

impl User {
    pub fn new(name: String, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            role,
        }
    }
}
