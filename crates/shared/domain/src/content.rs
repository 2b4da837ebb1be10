//! CMS-managed content entities: navigation links and the editable
//! building blocks of the public pages. None of these are events, so
//! none carry a creation stamp.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use veranda_store::{Entity, StoreError};

use crate::sanitize::from_payload;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationItem {
    pub id: String,
    pub label: String,
    pub href: String,
}

impl Entity for NavigationItem {
    const KIND: &'static str = "navigation item";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn sanitize(payload: Value) -> Result<Self, StoreError> {
        from_payload(payload)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Amenity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
}

impl Entity for Amenity {
    const KIND: &'static str = "amenity";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn sanitize(payload: Value) -> Result<Self, StoreError> {
        from_payload(payload)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactItem {
    pub id: String,
    pub label: String,
    pub value: String,
    pub icon: String,
}

impl Entity for ContactItem {
    const KIND: &'static str = "contact item";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn sanitize(payload: Value) -> Result<Self, StoreError> {
        from_payload(payload)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DiningHighlight {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
}

impl Entity for DiningHighlight {
    const KIND: &'static str = "dining highlight";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn sanitize(payload: Value) -> Result<Self, StoreError> {
        from_payload(payload)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub description: String,
    pub opening_hours: String,
    pub image: String,
}

impl Entity for Restaurant {
    const KIND: &'static str = "restaurant";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn sanitize(payload: Value) -> Result<Self, StoreError> {
        from_payload(payload)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SignatureDish {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "crate::sanitize::lenient_f64")]
    pub price: f64,
    /// Denormalized restaurant name the dish is served at.
    pub restaurant: String,
    pub image: String,
}

impl Entity for SignatureDish {
    const KIND: &'static str = "signature dish";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn sanitize(payload: Value) -> Result<Self, StoreError> {
        from_payload(payload)
    }
}
