use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use quizdesk_server::{
    app_state::AppState, auth::ADMIN_PASSWORD_HEADER, config::Config, handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();

    if config.is_production() {
        if let Err(err) = config.validate_for_production() {
            log::error!("Refusing to start: {}", err);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()));
        }
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let allowed_origins = config.cors_allowed_origins.clone();

    let state = AppState::new(config).await.map_err(|err| {
        log::error!("Failed to initialise application state: {}", err);
        std::io::Error::other(err.to_string())
    })?;
    let state = web::Data::new(state);

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
            ])
            .allowed_header(ADMIN_PASSWORD_HEADER)
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(r#"%a "%r" %s %b %T request_id=%{x-request-id}o"#))
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
