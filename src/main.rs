use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;

use rust_mipcl::config::AppConfig;
use rust_mipcl::domain::solver_factory::create_default_factory;
use rust_mipcl::domain::solvers::MIPCL_EXECUTABLE;
use rust_mipcl::handlers::{configure, json_config, AppState};
use rust_mipcl::services::Services;

// ---------- Server bootstrap ----------
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    let services = Services::from_config(&config);
    if let Some(path) = &config.mipcl_executable {
        services
            .registry
            .register_executable_path(MIPCL_EXECUTABLE, path);
    }

    let factory = create_default_factory(services);
    let state = web::Data::new(AppState::new(factory, config.keepfiles));
    let json_limit = config.json_limit;

    log::info!("Starting server on http://127.0.0.1:{}", config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(json_config(json_limit))
            .configure(configure)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
