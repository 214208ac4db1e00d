//! Authenticated actors and their roles.

use serde::{Deserialize, Serialize};

/// Role represents the access level of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Customer places orders and follows their progress.
    Customer,
    /// HotelOwner manages orders for hotels they own.
    HotelOwner,
    /// Admin has unrestricted access to every order.
    Admin,
}

/// Actor is an already-authenticated user as supplied by the session layer.
///
/// Authentication itself is out of scope; callers hand in the identity,
/// role, and display name resolved by the session collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// ID is the opaque user identifier.
    pub id: String,
    /// Role determines which order operations are permitted.
    pub role: Role,
    /// Name is snapshotted onto orders the actor places.
    pub name: String,
}

impl Actor {
    /// Creates an actor with the given identity and role.
    pub fn new(id: impl Into<String>, role: Role, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            name: name.into(),
        }
    }
}
