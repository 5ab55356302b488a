use actix_web::{web, HttpResponse};

use crate::domain::customer::{ApiError, Customer, NewCustomer};
use crate::errors::EndpointError;
use crate::infrastructure::in_memory::InMemoryDirectory;

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/customers
///
/// Returns every customer in insertion order.
#[utoipa::path(
    get,
    path = "/api/customers",
    responses(
        (status = 200, description = "All customers", body = [Customer]),
        (status = 500, description = "Internal server error", body = ApiError),
    ),
    tag = "customers"
)]
pub async fn list_customers(
    directory: web::Data<InMemoryDirectory>,
) -> Result<HttpResponse, EndpointError> {
    let customers = directory.list()?;
    Ok(HttpResponse::Ok().json(customers))
}

/// POST /api/customers
///
/// Validates and stores a new customer. An empty `businessName` is stored as absent.
#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = NewCustomer,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Missing field or malformed email", body = ApiError),
        (status = 409, description = "Email already registered", body = ApiError),
    ),
    tag = "customers"
)]
pub async fn create_customer(
    directory: web::Data<InMemoryDirectory>,
    body: web::Json<NewCustomer>,
) -> Result<HttpResponse, EndpointError> {
    let customer = directory.insert(body.into_inner())?;
    log::info!("created customer {}", customer.email);
    Ok(HttpResponse::Created().json(customer))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::json;

    use crate::configure;
    use crate::domain::customer::{ApiError, Customer};
    use crate::infrastructure::in_memory::InMemoryDirectory;

    #[actix_web::test]
    async fn get_lists_customers() {
        let directory = Arc::new(InMemoryDirectory::with_customers(vec![Customer {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@x.com".to_string(),
            business_name: None,
        }]));
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, directory))).await;

        let req = test::TestRequest::get().uri("/api/customers").to_request();
        let body: Vec<Customer> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.len(), 1);
        assert_eq!(body[0].email, "ann@x.com");
    }

    #[actix_web::test]
    async fn post_creates_customer() {
        let directory = Arc::new(InMemoryDirectory::new());
        let app = test::init_service(
            App::new().configure(|cfg| configure(cfg, Arc::clone(&directory))),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/customers")
            .set_json(json!({
                "firstName": "Bo",
                "lastName": "Ng",
                "email": "bo@x.com",
                "businessName": ""
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(directory.list().expect("list failed").len(), 1);
    }

    #[actix_web::test]
    async fn post_with_bad_email_returns_api_error() {
        let directory = Arc::new(InMemoryDirectory::new());
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, directory))).await;

        let req = test::TestRequest::post()
            .uri("/api/customers")
            .set_json(json!({
                "firstName": "Bo",
                "lastName": "Ng",
                "email": "bo"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = test::read_body_json(resp).await;
        assert_eq!(error.code, "invalid_email");
    }

    #[actix_web::test]
    async fn malformed_body_returns_api_error() {
        let directory = Arc::new(InMemoryDirectory::new());
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, directory))).await;

        let req = test::TestRequest::post()
            .uri("/api/customers")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = test::read_body_json(resp).await;
        assert_eq!(error.code, "malformed_body");
    }
}
