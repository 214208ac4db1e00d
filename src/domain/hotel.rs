//! Hotel reference data used for ownership checks.

use serde::{Deserialize, Serialize};

/// Hotel is the restaurant/hotel entity an order is placed against.
///
/// Hotel management is an external collaborator; only the fields needed for
/// ownership resolution are modeled here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    /// ID is the opaque hotel identifier.
    pub id: String,
    /// OwnerID is the user id of the hotel owner.
    pub owner_id: String,
    /// Name is the display name of the hotel.
    pub name: String,
}
