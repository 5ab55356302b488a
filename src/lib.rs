pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod render;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;

pub use application::creation_flow::{CreationFlow, CreationState, DialogPhase};
pub use application::directory_store::{DirectorySnapshot, DirectoryStore, LoadState};
pub use application::screen::DirectoryScreen;
pub use config::Config;
pub use domain::customer::{ApiError, Customer, CustomerCollection, Draft, DraftField, NewCustomer};
pub use domain::errors::DirectoryError;
pub use domain::ports::DirectoryApi;
pub use errors::EndpointError;
pub use infrastructure::http_directory::HttpDirectoryClient;
pub use infrastructure::in_memory::InMemoryDirectory;

/// Path the reference endpoint serves the directory under.
pub const DIRECTORY_PATH: &str = "/api/customers";

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::customers::list_customers,
        handlers::customers::create_customer,
    ),
    components(schemas(Customer, NewCustomer, ApiError)),
    tags((name = "customers", description = "Customer directory"))
)]
pub struct ApiDoc;

/// Registers the directory routes backed by `directory`.
pub fn configure(cfg: &mut web::ServiceConfig, directory: Arc<InMemoryDirectory>) {
    cfg.app_data(web::Data::from(directory))
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            EndpointError::invalid("malformed_body", err.to_string()).into()
        }))
        .service(
            web::resource(DIRECTORY_PATH)
                .route(web::get().to(handlers::customers::list_customers))
                .route(web::post().to(handlers::customers::create_customer)),
        );
}

/// Build and return an actix-web `Server` for the reference directory endpoint,
/// bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    directory: Arc<InMemoryDirectory>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        let directory = Arc::clone(&directory);
        App::new()
            .wrap(Logger::default())
            .configure(move |cfg| configure(cfg, directory))
    })
    .bind((host.to_string(), port))?
    .run())
}
