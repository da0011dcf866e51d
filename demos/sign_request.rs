//! Webhook Signing Demo
//!
//! Prints the headers a sender attaches to a signed webhook and a curl
//! command that exercises a locally running receiver. Run with:
//!
//! ```text
//! WEBHOOK_SIGNING_KEY=my-secret cargo run --example sign_request -- '{"id":"evt_1"}' 'b=2&a=1'
//! ```

use webhook_signature::{
    SIGNATURE_HEADER, SignatureConfig, TIMESTAMP_HEADER, Validator, utils::canonical_query,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SignatureConfig::from_env()?;
    let validator = Validator::from_config(&config);

    let mut args = std::env::args().skip(1);
    let body = args.next().unwrap_or_default();
    let query = args.next().unwrap_or_default();
    let timestamp = chrono::Utc::now().timestamp().to_string();

    let signature = validator.sign(&timestamp, &query, body.as_bytes())?;

    println!("Signed webhook request");
    println!("======================\n");
    println!("  {TIMESTAMP_HEADER}: {timestamp}");
    println!("  {SIGNATURE_HEADER}: {signature}");
    println!("  Canonical query: '{}'", canonical_query(&query));
    println!("  Body: '{body}'");

    let suffix = if query.is_empty() {
        String::new()
    } else {
        format!("?{query}")
    };

    println!("\nExample curl command:");
    println!("curl -X POST \\");
    println!("     -H '{TIMESTAMP_HEADER}: {timestamp}' \\");
    println!("     -H '{SIGNATURE_HEADER}: {signature}' \\");
    println!("     --data '{body}' \\");
    println!("     'http://localhost:8080/webhooks{suffix}'");

    if let Some(window) = validator.validity_window() {
        println!("\nThe receiver accepts this request for about {}s.", window.as_secs() / 2);
    }

    Ok(())
}
