use utoipa_axum::router::OpenApiRouter;
use veranda_domain::{DiningReservation, Reservation};

use super::BOOKINGS_TAG;
use crate::state::ApiState;

collection_routes! {
    entity: Reservation,
    tag: BOOKINGS_TAG,
    path: "/api/reservations",
    item_path: "/api/reservations/{id}",
    router: reservation_routes,
    list: list_reservations,
    create: create_reservation,
    update: update_reservation,
    delete: delete_reservation,
}

collection_routes! {
    entity: DiningReservation,
    tag: BOOKINGS_TAG,
    path: "/api/dining-reservations",
    item_path: "/api/dining-reservations/{id}",
    router: dining_reservation_routes,
    list: list_dining_reservations,
    create: create_dining_reservation,
    update: update_dining_reservation,
    delete: delete_dining_reservation,
}

pub(super) fn router() -> OpenApiRouter<ApiState> {
    reservation_routes().merge(dining_reservation_routes())
}
