//! Physical rooms and the room types they belong to.
//!
//! Room types are protected by the deletion guard: the catalogue must
//! never be emptied, since rooms reference it by `roomTypeId`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use veranda_store::{Entity, StoreError};

use crate::sanitize::from_payload;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ManagedRoom {
    pub id: String,
    /// Door label, e.g. `101` or `12A`.
    pub number: String,
    /// Soft reference into the room-type catalogue; not enforced.
    pub room_type_id: String,
    #[serde(deserialize_with = "crate::sanitize::lenient_u32")]
    pub floor: u32,
    pub status: String,
    pub notes: String,
    pub created_at: String,
}

impl Default for ManagedRoom {
    fn default() -> Self {
        Self {
            id: String::new(),
            number: String::new(),
            room_type_id: String::new(),
            floor: 0,
            status: "available".to_string(),
            notes: String::new(),
            created_at: String::new(),
        }
    }
}

impl Entity for ManagedRoom {
    const KIND: &'static str = "room";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn sanitize(payload: Value) -> Result<Self, StoreError> {
        from_payload(payload)
    }

    fn set_created_at(&mut self, timestamp: String) {
        self.created_at = timestamp;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomType {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "crate::sanitize::lenient_f64")]
    pub price_per_night: f64,
    #[serde(deserialize_with = "crate::sanitize::lenient_u32")]
    pub capacity: u32,
    #[serde(deserialize_with = "crate::sanitize::lenient_u32")]
    pub total_rooms: u32,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub created_at: String,
}

impl Entity for RoomType {
    const KIND: &'static str = "room type";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn sanitize(payload: Value) -> Result<Self, StoreError> {
        from_payload(payload)
    }

    fn set_created_at(&mut self, timestamp: String) {
        self.created_at = timestamp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_room_defaults_to_available() {
        let room = ManagedRoom::sanitize(json!({
            "number": "204",
            "roomTypeId": "rt-1",
        }))
        .unwrap();

        assert_eq!(room.status, "available");
        assert_eq!(room.floor, 0);
    }

    #[test]
    fn test_room_type_minimal_payload() {
        let room_type = RoomType::sanitize(json!({
            "name": "Suite",
            "totalRooms": 5,
        }))
        .unwrap();

        assert_eq!(room_type.name, "Suite");
        assert_eq!(room_type.total_rooms, 5);
        assert_eq!(room_type.capacity, 0);
        assert!((room_type.price_per_night - 0.0).abs() < f64::EPSILON);
        assert!(room_type.amenities.is_empty());
        assert!(room_type.images.is_empty());
    }

    #[test]
    fn test_room_type_price_coercion() {
        let room_type = RoomType::sanitize(json!({
            "name": "Deluxe",
            "pricePerNight": "189.50",
            "capacity": "3",
        }))
        .unwrap();

        assert!((room_type.price_per_night - 189.5).abs() < f64::EPSILON);
        assert_eq!(room_type.capacity, 3);
    }

    #[test]
    fn test_room_type_label_reads_naturally_in_errors() {
        assert_eq!(RoomType::KIND, "room type");
        assert_eq!(ManagedRoom::KIND, "room");
    }
}
