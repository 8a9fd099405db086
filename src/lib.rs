pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod routes;
pub mod scoring;
pub mod store;

use crate::models::AppState;
use crate::routes::{chef, meal_plan, pantry, recipes, shopping};

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router, extract::ConnectInfo};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{Span, info_span};

async fn healthz() -> Json<&'static str> {
    Json("ok")
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn build_app(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            let method = req.method().to_string();
            let uri = req.uri().to_string();
            let client_ip = req
                .extensions()
                .get::<ConnectInfo<std::net::SocketAddr>>()
                .map(|ci| ci.0.to_string())
                .unwrap_or_else(|| "-".into());
            let rid = req
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");

            info_span!("http", method=%method, uri=%uri, client_ip=%client_ip, request_id=%rid)
        })
        .on_request(|_req: &Request<Body>, _span: &Span| {
            tracing::info!("request started");
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &Span| {
            tracing::info!(status=%res.status(), latency_ms=%latency.as_millis(), "response completed");
        })
        .on_failure(|_class: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
            tracing::error!(latency_ms=%latency.as_millis(), "request failed");
        });

    // Request-ID middleware comes first so everything downstream
    // has access to the x-request-id header.
    let request_id_layer = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id());

    Router::new()
        .route("/healthz", get(healthz))
        .route("/pantry", get(pantry::list).post(pantry::add).delete(pantry::clear))
        .route("/pantry/{name}", delete(pantry::remove))
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route("/recipes/matches", get(recipes::matches))
        .route("/recipes/generate", post(chef::generate))
        .route("/recipes/import", post(chef::import))
        .route(
            "/recipes/{id}",
            get(recipes::get)
                .delete(recipes::delete)
                .patch(recipes::update),
        )
        .route("/recipes/{id}/tips", post(chef::tips))
        .route("/meal-plan", get(meal_plan::get_week).post(meal_plan::assign))
        .route("/meal-plan/{day}/{recipe_id}", delete(meal_plan::unassign))
        .route("/shopping-list", get(shopping::list))
        .with_state(state)
        .layer(request_id_layer)
        .layer(cors_layer())
        .layer(trace)
}
