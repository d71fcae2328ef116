use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Compress, web};
use clap::Parser;
use tracing::info;

use tikaram_api::api::helpers::json_config;
use tikaram_api::api::middleware::RequestIdMiddleware;
use tikaram_api::api::services::{
    AppStartTime, event_routes, health_routes, inquiry_routes, lead_routes, recipe_routes,
    review_routes, store_routes, track_routes,
};
use tikaram_api::cli::{Cli, Commands, run_import_recipes};
use tikaram_api::config::{StaticConfig, get_config, init_config};
use tikaram_api::services::{GeoIpProvider, LocationTracker, Mailer, build_mailer};
use tikaram_api::storage::backend::{infer_backend_from_url, normalize_backend_name};
use tikaram_api::storage::{SeaOrmStorage, TrafficSink};
use tikaram_api::system::logging::init_logging;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(Commands::ConfigGen) = cli.command {
        print!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    }

    init_config();
    let config = get_config();

    // guard 活到进程结束，保证非阻塞日志落盘
    let _guard = init_logging(config);

    let backend = normalize_backend_name(
        &infer_backend_from_url(&config.database.database_url).map_err(io::Error::other)?,
    );
    let storage = Arc::new(
        SeaOrmStorage::new(&config.database.database_url, &backend)
            .await
            .map_err(io::Error::other)?,
    );

    if let Some(Commands::ImportRecipes { file }) = cli.command {
        let count = run_import_recipes(&storage, &file)
            .await
            .map_err(io::Error::other)?;
        println!("Imported {} recipes", count);
        return Ok(());
    }

    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let geoip = GeoIpProvider::new(&config.geoip);
    let mailer: Arc<dyn Mailer> = build_mailer(&config.email);
    let tracker = Arc::new(LocationTracker::new(
        geoip,
        storage.clone() as Arc<dyn TrafficSink>,
        &config.geoip,
    ));

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    let storage_data = web::Data::new(storage);
    let mailer_data = web::Data::new(mailer);
    let tracker_data = web::Data::new(tracker);

    HttpServer::new(move || {
        let cors = match config.server.cors_allowed_origin.as_deref() {
            Some(origin) if !origin.is_empty() => Cors::default()
                .allowed_origin(origin)
                .allowed_methods(vec!["GET", "POST"])
                .allow_any_header()
                .max_age(3600),
            _ => Cors::permissive(),
        };

        App::new()
            .wrap(Compress::default())
            .wrap(cors)
            .wrap(RequestIdMiddleware)
            .app_data(json_config())
            .app_data(storage_data.clone())
            .app_data(mailer_data.clone())
            .app_data(tracker_data.clone())
            .app_data(web::Data::new(app_start_time.clone()))
            .service(lead_routes())
            .service(review_routes())
            .service(store_routes())
            .service(track_routes())
            .service(inquiry_routes())
            .service(event_routes())
            .service(recipe_routes())
            .service(health_routes())
    })
    .workers(config.server.cpu_count)
    .bind(bind_address)?
    .run()
    .await
}
