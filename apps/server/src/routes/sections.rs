use utoipa_axum::router::OpenApiRouter;
use veranda_domain::{
    AboutContent, AvailabilityContent, HeroContent, SectionHeaders, Settings,
};

use super::SECTIONS_TAG;
use crate::state::ApiState;

section_routes! {
    section: Settings,
    tag: SECTIONS_TAG,
    path: "/api/settings",
    router: settings_routes,
    get: get_settings,
    update: update_settings,
}

section_routes! {
    section: HeroContent,
    tag: SECTIONS_TAG,
    path: "/api/hero",
    router: hero_routes,
    get: get_hero,
    update: update_hero,
}

section_routes! {
    section: AboutContent,
    tag: SECTIONS_TAG,
    path: "/api/about",
    router: about_routes,
    get: get_about,
    update: update_about,
}

section_routes! {
    section: AvailabilityContent,
    tag: SECTIONS_TAG,
    path: "/api/availability",
    router: availability_routes,
    get: get_availability,
    update: update_availability,
}

section_routes! {
    section: SectionHeaders,
    tag: SECTIONS_TAG,
    path: "/api/section-headers",
    router: section_header_routes,
    get: get_section_headers,
    update: update_section_headers,
}

pub(super) fn router() -> OpenApiRouter<ApiState> {
    settings_routes()
        .merge(hero_routes())
        .merge(about_routes())
        .merge(availability_routes())
        .merge(section_header_routes())
}
