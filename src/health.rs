use actix_web::{get, web, HttpResponse, Responder};

use crate::app_state::AppState;

/// `GET /livez` (spec.md §6): no I/O, always 200.
#[get("/livez")]
pub async fn livez() -> impl Responder {
    HttpResponse::Ok().body("OK\n")
}

/// `GET /readyz` (spec.md §6): 200 iff [`ReadinessUseCase::is_ready`]
/// reports the bus connected, 503 otherwise.
#[get("/readyz")]
pub async fn readyz(data: web::Data<AppState>) -> impl Responder {
    if data.project.readiness.is_ready().await {
        HttpResponse::Ok().body("OK\n")
    } else {
        HttpResponse::ServiceUnavailable().body("unavailable\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    use crate::tests::support::app_state_builder::TestAppStateBuilder;

    #[actix_web::test]
    async fn livez_is_always_ok() {
        let app = test::init_service(App::new().service(livez)).await;
        let req = test::TestRequest::get().uri("/livez").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn readyz_reflects_readiness() {
        let state = TestAppStateBuilder::default().not_ready().build();
        let app = test::init_service(
            App::new().app_data(state).service(readyz),
        )
        .await;
        let req = test::TestRequest::get().uri("/readyz").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
