mod arff;
mod classifier;
mod config;
mod handlers;
mod models;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use classifier::{Classifier, WekaClassifier};
use config::AppConfig;
use log::info;
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config =
        AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    info!(
        "Using WEKA jar {} with model {}",
        config.weka_jar_path.display(),
        config.model_path.display()
    );

    let classifier: Arc<dyn Classifier> = Arc::new(WekaClassifier::from_config(&config));
    let classifier = web::Data::from(classifier);

    let (host, port) = config.bind_addr();
    info!("Server running at http://{}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(classifier.clone())
            .configure(handlers::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
