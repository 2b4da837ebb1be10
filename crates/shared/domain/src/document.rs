//! The site document: single serialized root for everything the server
//! persists. Eleven ordered collections plus five singleton sections.
//!
//! `Default` doubles as the seed: a fresh deployment gets one
//! administrator, a working navigation, and enough section copy to render
//! the public site before anyone touches the CMS. Collections that grow
//! through use start empty.

use serde::{Deserialize, Serialize};
use veranda_store::{HasCollection, HasSingleton};

use crate::{
    accounts::AdminAccount,
    bookings::{DiningReservation, Reservation},
    content::{Amenity, ContactItem, DiningHighlight, NavigationItem, Restaurant, SignatureDish},
    rooms::{ManagedRoom, RoomType},
    sections::{
        AboutContent, AvailabilityContent, HeroContent, SectionHeader, SectionHeaders, Settings,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteDocument {
    pub reservations: Vec<Reservation>,
    pub dining_reservations: Vec<DiningReservation>,
    pub rooms: Vec<ManagedRoom>,
    pub room_types: Vec<RoomType>,
    pub admin_accounts: Vec<AdminAccount>,
    pub navigation: Vec<NavigationItem>,
    pub amenities: Vec<Amenity>,
    pub contact_items: Vec<ContactItem>,
    pub dining_highlights: Vec<DiningHighlight>,
    pub restaurants: Vec<Restaurant>,
    pub signature_dishes: Vec<SignatureDish>,
    pub settings: Settings,
    pub hero: HeroContent,
    pub about: AboutContent,
    pub availability: AvailabilityContent,
    pub section_headers: SectionHeaders,
}

macro_rules! impl_has_collection {
    ($($field:ident: $entity:ty),* $(,)?) => {
        $(
            impl HasCollection<$entity> for SiteDocument {
                fn collection(&self) -> &[$entity] {
                    &self.$field
                }

                fn collection_mut(&mut self) -> &mut Vec<$entity> {
                    &mut self.$field
                }
            }
        )*
    };
}

macro_rules! impl_has_singleton {
    ($($field:ident: $section:ty),* $(,)?) => {
        $(
            impl HasSingleton<$section> for SiteDocument {
                fn singleton(&self) -> &$section {
                    &self.$field
                }

                fn singleton_mut(&mut self) -> &mut $section {
                    &mut self.$field
                }
            }
        )*
    };
}

impl_has_collection! {
    reservations: Reservation,
    dining_reservations: DiningReservation,
    rooms: ManagedRoom,
    room_types: RoomType,
    admin_accounts: AdminAccount,
    navigation: NavigationItem,
    amenities: Amenity,
    contact_items: ContactItem,
    dining_highlights: DiningHighlight,
    restaurants: Restaurant,
    signature_dishes: SignatureDish,
}

impl_has_singleton! {
    settings: Settings,
    hero: HeroContent,
    about: AboutContent,
    availability: AvailabilityContent,
    section_headers: SectionHeaders,
}

impl Default for SiteDocument {
    fn default() -> Self {
        Self {
            reservations: Vec::new(),
            dining_reservations: Vec::new(),
            rooms: Vec::new(),
            room_types: Vec::new(),
            admin_accounts: vec![AdminAccount::seed()],
            navigation: seed_navigation(),
            amenities: Vec::new(),
            contact_items: Vec::new(),
            dining_highlights: Vec::new(),
            restaurants: Vec::new(),
            signature_dishes: Vec::new(),
            settings: seed_settings(),
            hero: seed_hero(),
            about: seed_about(),
            availability: seed_availability(),
            section_headers: seed_section_headers(),
        }
    }
}

fn seed_navigation() -> Vec<NavigationItem> {
    let links = [
        ("nav-1", "Home", "/"),
        ("nav-2", "Rooms", "/rooms"),
        ("nav-3", "Dining", "/dining"),
        ("nav-4", "Amenities", "/amenities"),
        ("nav-5", "Contact", "/contact"),
    ];

    links
        .into_iter()
        .map(|(id, label, href)| NavigationItem {
            id: id.to_string(),
            label: label.to_string(),
            href: href.to_string(),
        })
        .collect()
}

fn seed_settings() -> Settings {
    Settings {
        site_name: "Veranda Hotel".to_string(),
        tagline: "Seaside calm, city comfort".to_string(),
        contact_email: "stay@veranda.example".to_string(),
        contact_phone: "+1 (555) 010-4180".to_string(),
        address: "1 Esplanade Walk, Porto Azul".to_string(),
        footer_text: "© Veranda Hotel. All rights reserved.".to_string(),
        check_in_time: "15:00".to_string(),
        check_out_time: "11:00".to_string(),
    }
}

fn seed_hero() -> HeroContent {
    HeroContent {
        heading: "Welcome to Veranda".to_string(),
        subheading: "A quiet terrace above the bay".to_string(),
        background_image: "/images/hero.jpg".to_string(),
        cta_label: "Book your stay".to_string(),
        cta_href: "#availability".to_string(),
    }
}

fn seed_about() -> AboutContent {
    AboutContent {
        heading: "Our story".to_string(),
        body: "Perched above the old harbour since 1962, Veranda pairs \
               mid-century bones with sea light in every room."
            .to_string(),
        image: "/images/about.jpg".to_string(),
    }
}

fn seed_availability() -> AvailabilityContent {
    AvailabilityContent {
        heading: "Check availability".to_string(),
        subheading: "Find the right room for your dates".to_string(),
        note: "Call the front desk for group bookings of six rooms or more.".to_string(),
    }
}

fn seed_section_headers() -> SectionHeaders {
    SectionHeaders {
        rooms: SectionHeader {
            title: "Rooms & Suites".to_string(),
            subtitle: "From snug doubles to the corner suite".to_string(),
        },
        dining: SectionHeader {
            title: "Dining".to_string(),
            subtitle: "Two restaurants, one long view".to_string(),
        },
        amenities: SectionHeader {
            title: "Amenities".to_string(),
            subtitle: "Everything a slow morning needs".to_string(),
        },
        contact: SectionHeader {
            title: "Contact".to_string(),
            subtitle: "We answer the phone like it matters".to_string(),
        },
        availability: SectionHeader {
            title: "Availability".to_string(),
            subtitle: "Pick your dates, we hold the rest".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_seed_is_ready_for_first_login() {
        let document = SiteDocument::default();

        assert_eq!(document.admin_accounts.len(), 1);
        assert!(document.admin_accounts[0].verify_login("admin123"));
        assert!(document.room_types.is_empty());
        assert!(document.reservations.is_empty());
        assert!(!document.navigation.is_empty());
        assert!(!document.settings.site_name.is_empty());
    }

    #[test]
    fn test_seed_navigation_ids_are_unique() {
        let document = SiteDocument::default();
        let mut ids: Vec<&str> = document.navigation.iter().map(|item| item.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), document.navigation.len());
    }

    #[test]
    fn test_wire_keys_are_camel_case() {
        let encoded = serde_json::to_value(SiteDocument::default()).unwrap();

        for key in [
            "reservations",
            "diningReservations",
            "rooms",
            "roomTypes",
            "adminAccounts",
            "navigation",
            "amenities",
            "contactItems",
            "diningHighlights",
            "restaurants",
            "signatureDishes",
            "settings",
            "hero",
            "about",
            "availability",
            "sectionHeaders",
        ] {
            assert!(encoded.get(key).is_some(), "missing key `{key}`");
        }

        let admin = &encoded["adminAccounts"][0];
        assert!(admin.get("passwordHash").is_some());
        assert!(admin.get("fullName").is_some());
    }

    #[test]
    fn test_empty_json_falls_back_to_seed() {
        let parsed: SiteDocument = serde_json::from_str("{}").unwrap();

        assert_eq!(parsed, SiteDocument::default());
    }

    #[test]
    fn test_unknown_top_level_keys_are_tolerated() {
        let mut encoded = serde_json::to_value(SiteDocument::default()).unwrap();
        encoded["legacyCounter"] = Value::from(42);

        let parsed: SiteDocument = serde_json::from_value(encoded).unwrap();
        assert_eq!(parsed, SiteDocument::default());
    }
}
