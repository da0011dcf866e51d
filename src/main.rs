use actix_web::HttpServer;
use webhook_signature::{
    ServerConfig, SignatureConfig, TelemetryConfig, Validator, create_app, init_tracing,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let telemetry = TelemetryConfig::from_env();
    if let Err(e) = init_tracing(&telemetry) {
        eprintln!("Failed to initialize tracing: {e}");
    }

    let signature_config = SignatureConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let server_config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let validator = Validator::from_config(&signature_config);

    tracing::info!(
        host = %server_config.host,
        port = server_config.port,
        validity_window_secs = ?validator.validity_window().map(|w| w.as_secs()),
        "Webhook receiver starting"
    );

    HttpServer::new(move || create_app(validator.clone()))
        .bind(server_config.bind_address())?
        .run()
        .await
}
