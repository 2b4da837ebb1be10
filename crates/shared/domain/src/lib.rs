//! # Veranda domain model
//!
//! Shared data model for the Veranda hotel site: the [`SiteDocument`]
//! persisted by `veranda-store`, the entities and sections it contains,
//! and the application configuration deserialized by `veranda-kernel`.
//!
//! Every record type serializes with camelCase keys so the persisted
//! document and the HTTP payloads share one shape.

pub mod accounts;
pub mod bookings;
pub mod config;
pub mod content;
pub mod document;
pub mod rooms;
mod sanitize;
pub mod sections;

pub use self::{
    accounts::{AdminAccount, AdminAccountView},
    bookings::{DiningReservation, Reservation},
    config::{AppConfig, LoggingConfig, ServerConfig, SslConfig, StorageConfig},
    content::{
        Amenity, ContactItem, DiningHighlight, NavigationItem, Restaurant, SignatureDish,
    },
    document::SiteDocument,
    rooms::{ManagedRoom, RoomType},
    sections::{
        AboutContent, AvailabilityContent, HeroContent, SectionHeader, SectionHeaders, Settings,
    },
};
