use axum::Json;
use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use veranda_domain::{
    AboutContent, Amenity, AvailabilityContent, ContactItem, DiningHighlight, HeroContent,
    NavigationItem, Restaurant, RoomType, SectionHeaders, SignatureDish, Settings,
};

use super::SITE_TAG;
use crate::state::ApiState;

/// Everything the public site needs to render, in one trip.
///
/// Bookings, physical rooms and accounts are admin-side data and stay out.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LandingContent {
    settings: Settings,
    hero: HeroContent,
    about: AboutContent,
    availability: AvailabilityContent,
    section_headers: SectionHeaders,
    navigation: Vec<NavigationItem>,
    room_types: Vec<RoomType>,
    amenities: Vec<Amenity>,
    contact_items: Vec<ContactItem>,
    dining_highlights: Vec<DiningHighlight>,
    restaurants: Vec<Restaurant>,
    signature_dishes: Vec<SignatureDish>,
}

#[utoipa::path(
    get,
    path = "/api/landing-content",
    responses((status = OK, description = "Aggregated public site content", body = LandingContent)),
    tag = SITE_TAG,
)]
async fn landing_content(State(state): State<ApiState>) -> Json<LandingContent> {
    // One snapshot keeps the composite internally consistent even while
    // writers are active.
    let doc = state.store.snapshot();
    Json(LandingContent {
        settings: doc.settings.clone(),
        hero: doc.hero.clone(),
        about: doc.about.clone(),
        availability: doc.availability.clone(),
        section_headers: doc.section_headers.clone(),
        navigation: doc.navigation.clone(),
        room_types: doc.room_types.clone(),
        amenities: doc.amenities.clone(),
        contact_items: doc.contact_items.clone(),
        dining_highlights: doc.dining_highlights.clone(),
        restaurants: doc.restaurants.clone(),
        signature_dishes: doc.signature_dishes.clone(),
    })
}

pub(super) fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(landing_content))
}
