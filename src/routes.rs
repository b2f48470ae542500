use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{config, AppConfig};
use crate::database::models::{Booking, Checklist, Todo};
use crate::handlers::{protected, public};
use crate::middleware::require_auth;
use crate::state::AppState;

// Path parameter names must agree wherever two routes share a prefix
// (`/flight/:id` and `/flight/:id/:end_date`), so search routes reuse `:id`
// for the start date.

/// Full application router with global middleware applied
pub fn app(state: AppState) -> Router {
    let config = config();

    let mut router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
                .layer(cors_layer(config)),
        );

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    use public::{auth, flight, status};

    Router::new()
        .route("/", get(status::root))
        .route("/health", get(status::health))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/flight", get(flight::index))
        .route("/flight/:id", get(flight::show))
        .route("/flight/:id/:end_date", get(flight::search_by_date))
        .route("/flight/:id/:end_date/:destination", get(flight::search_by_destination))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{auth, booking, checklist_item, flight, owned, passenger};

    Router::new()
        // Session
        .route("/logout", post(auth::logout))
        .route("/user", get(auth::whoami))
        // Flight catalogue mutations
        .route("/flight", post(flight::store))
        .route("/flight/:id", put(flight::update).delete(flight::destroy))
        // Todos
        .route("/todo", get(owned::index::<Todo>).post(owned::store::<Todo>))
        .route(
            "/todo/:id",
            get(owned::show::<Todo>)
                .put(owned::update::<Todo>)
                .delete(owned::destroy::<Todo>),
        )
        // Checklists and their items
        .route(
            "/checklist",
            get(owned::index::<Checklist>).post(owned::store::<Checklist>),
        )
        .route(
            "/checklist/:checklist_id",
            get(owned::show::<Checklist>)
                .put(owned::update::<Checklist>)
                .delete(owned::destroy::<Checklist>),
        )
        .route(
            "/checklist/:checklist_id/item",
            get(checklist_item::index).post(checklist_item::store),
        )
        .route(
            "/checklist/:checklist_id/item/:item_id",
            get(checklist_item::show)
                .put(checklist_item::update_status)
                .delete(checklist_item::destroy),
        )
        .route(
            "/checklist/:checklist_id/item/rename/:item_id",
            put(checklist_item::rename),
        )
        // Bookings and their passengers
        .route("/booking", get(owned::index::<Booking>).post(booking::store))
        .route(
            "/booking/:booking_id",
            get(owned::show::<Booking>)
                .put(owned::update::<Booking>)
                .delete(owned::destroy::<Booking>),
        )
        .route(
            "/booking/:booking_id/passenger",
            get(passenger::index).post(passenger::store),
        )
        .route(
            "/booking/:booking_id/passenger/:passenger_id",
            get(passenger::show)
                .put(passenger::update)
                .delete(passenger::destroy),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if !config.security.enable_cors {
        return CorsLayer::new();
    }
    if config.cors_is_permissive() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
