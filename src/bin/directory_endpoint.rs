use std::sync::Arc;

use customer_directory::{build_server, Config, InMemoryDirectory, DIRECTORY_PATH};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(std::io::Error::other)?;
    let directory = Arc::new(InMemoryDirectory::new());

    log::info!(
        "Serving customer directory at http://{}:{}{}",
        config.host,
        config.port,
        DIRECTORY_PATH
    );

    build_server(directory, &config.host, config.port)?.await
}
