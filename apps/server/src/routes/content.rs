use axum::Json;
use axum::extract::State;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use veranda_domain::{
    Amenity, ContactItem, DiningHighlight, NavigationItem, Restaurant, SignatureDish,
};

use super::CONTENT_TAG;
use crate::error::ApiError;
use crate::state::ApiState;

collection_routes! {
    entity: NavigationItem,
    tag: CONTENT_TAG,
    path: "/api/navigation",
    item_path: "/api/navigation/{id}",
    router: navigation_crud,
    list: list_navigation,
    create: create_navigation_item,
    update: update_navigation_item,
    delete: delete_navigation_item,
}

collection_routes! {
    entity: Amenity,
    tag: CONTENT_TAG,
    path: "/api/amenities",
    item_path: "/api/amenities/{id}",
    router: amenity_routes,
    list: list_amenities,
    create: create_amenity,
    update: update_amenity,
    delete: delete_amenity,
}

collection_routes! {
    entity: ContactItem,
    tag: CONTENT_TAG,
    path: "/api/contact-items",
    item_path: "/api/contact-items/{id}",
    router: contact_item_routes,
    list: list_contact_items,
    create: create_contact_item,
    update: update_contact_item,
    delete: delete_contact_item,
}

collection_routes! {
    entity: DiningHighlight,
    tag: CONTENT_TAG,
    path: "/api/dining-highlights",
    item_path: "/api/dining-highlights/{id}",
    router: dining_highlight_routes,
    list: list_dining_highlights,
    create: create_dining_highlight,
    update: update_dining_highlight,
    delete: delete_dining_highlight,
}

collection_routes! {
    entity: Restaurant,
    tag: CONTENT_TAG,
    path: "/api/restaurants",
    item_path: "/api/restaurants/{id}",
    router: restaurant_routes,
    list: list_restaurants,
    create: create_restaurant,
    update: update_restaurant,
    delete: delete_restaurant,
}

collection_routes! {
    entity: SignatureDish,
    tag: CONTENT_TAG,
    path: "/api/signature-dishes",
    item_path: "/api/signature-dishes/{id}",
    router: signature_dish_routes,
    list: list_signature_dishes,
    create: create_signature_dish,
    update: update_signature_dish,
    delete: delete_signature_dish,
}

/// Reordering the menu is a whole-list operation on the admin side, so the
/// navigation collection also accepts a bulk replacement.
#[utoipa::path(
    put,
    path = "/api/navigation",
    request_body = [NavigationItem],
    responses((status = OK, description = "Replacement menu, in order", body = [NavigationItem])),
    tag = CONTENT_TAG,
)]
async fn replace_navigation(
    State(state): State<ApiState>,
    Json(entries): Json<Vec<NavigationItem>>,
) -> Result<Json<Vec<NavigationItem>>, ApiError> {
    let stored = state
        .store
        .collection::<NavigationItem>()
        .replace_all(entries)
        .await?;
    Ok(Json(stored))
}

pub(super) fn router() -> OpenApiRouter<ApiState> {
    navigation_crud()
        .routes(routes!(replace_navigation))
        .merge(amenity_routes())
        .merge(contact_item_routes())
        .merge(dining_highlight_routes())
        .merge(restaurant_routes())
        .merge(signature_dish_routes())
}
