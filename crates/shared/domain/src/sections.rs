//! Singleton page sections. Each exists exactly once per document and is
//! only ever merged, never created or deleted.
//!
//! [`SectionHeaders`] is the one nested section: a record of per-page
//! sub-records, merged one level deep so updating a title keeps the
//! sibling subtitle.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use veranda_store::Section;

/// Site-wide settings shown in the header, footer, and contact blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub site_name: String,
    pub tagline: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub footer_text: String,
    pub check_in_time: String,
    pub check_out_time: String,
}

impl Section for Settings {
    const KIND: &'static str = "settings";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContent {
    pub heading: String,
    pub subheading: String,
    pub background_image: String,
    pub cta_label: String,
    pub cta_href: String,
}

impl Section for HeroContent {
    const KIND: &'static str = "hero content";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AboutContent {
    pub heading: String,
    pub body: String,
    pub image: String,
}

impl Section for AboutContent {
    const KIND: &'static str = "about content";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AvailabilityContent {
    pub heading: String,
    pub subheading: String,
    pub note: String,
}

impl Section for AvailabilityContent {
    const KIND: &'static str = "availability content";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionHeader {
    pub title: String,
    pub subtitle: String,
}

/// One header per public page section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionHeaders {
    pub rooms: SectionHeader,
    pub dining: SectionHeader,
    pub amenities: SectionHeader,
    pub contact: SectionHeader,
    pub availability: SectionHeader,
}

impl Section for SectionHeaders {
    const KIND: &'static str = "section headers";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_keys_are_camel_case() {
        let encoded = serde_json::to_value(Settings {
            site_name: "Veranda".to_string(),
            ..Settings::default()
        })
        .unwrap();

        assert!(encoded.get("siteName").is_some());
        assert!(encoded.get("checkInTime").is_some());
        assert!(encoded.get("site_name").is_none());
    }

    #[test]
    fn test_partial_section_payload_fills_defaults() {
        let headers: SectionHeaders =
            serde_json::from_str(r#"{"rooms": {"title": "Rooms"}}"#).unwrap();

        assert_eq!(headers.rooms.title, "Rooms");
        assert!(headers.rooms.subtitle.is_empty());
        assert!(headers.dining.title.is_empty());
    }
}
