//! Guest-facing booking requests: room reservations and dining
//! reservations. Both are events, so they carry a creation stamp.
//!
//! The structs double as sanitizer descriptors: `#[serde(default)]` fills
//! unset fields, the lenient deserializers coerce form-submitted numbers,
//! and unknown keys are dropped on decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use veranda_store::{Entity, StoreError};

use crate::sanitize::from_payload;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Denormalized room-type name as shown to the guest, not an id.
    pub room_type: String,
    pub check_in: String,
    pub check_out: String,
    #[serde(deserialize_with = "crate::sanitize::lenient_u32")]
    pub adults: u32,
    #[serde(deserialize_with = "crate::sanitize::lenient_u32")]
    pub children: u32,
    pub special_requests: String,
    pub created_at: String,
}

impl Entity for Reservation {
    const KIND: &'static str = "reservation";

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
pub struct DiningReservation {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Denormalized restaurant name, not an id.
    pub restaurant: String,
    pub date: String,
    pub time: String,
    #[serde(deserialize_with = "crate::sanitize::lenient_u32")]
    pub party_size: u32,
    pub special_requests: String,
    pub created_at: String,
}

impl Entity for DiningReservation {
    const KIND: &'static str = "dining reservation";

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
