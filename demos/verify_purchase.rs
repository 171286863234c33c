//! Purchase verification demo.
//!
//! Verifies a download key against itch.io, then asks again to show the
//! cached answer.
//!
//! # Running
//!
//! ```bash
//! export ITCH_API_KEY="your-api-key"
//! export ITCH_GAME_ID="123456"
//! RUST_LOG=itchwarden=debug cargo run --example verify_purchase -- DOWNLOAD-KEY
//! ```

use itchwarden::{ApiResult, ItchClient, ItchConfig, ItchError, ItchEvent};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let download_key = std::env::args()
        .nth(1)
        .expect("Usage: verify_purchase <download-key>");

    // API key and game id come from ITCH_API_KEY / ITCH_GAME_ID
    let client = match ItchClient::new(ItchConfig::from_env()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let mut events = client.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let ItchEvent::VerifyPurchaseResult { is_verified, .. } = event {
                println!("  [event] verify_purchase_result: {}", is_verified);
            }
        }
    });

    for attempt in 1..=2 {
        match client.verify_purchase(&download_key).await {
            Ok(check) if check.verified => {
                println!("✓ Purchase verified (attempt {}, cached: {})", attempt, check.from_cache);
            }
            Ok(check) => {
                match check.result {
                    ApiResult::Error { message, .. } => eprintln!("✗ itch.io error: {}", message),
                    ApiResult::Success { .. } => println!("✗ Download key not valid for this game"),
                }
                break;
            }
            Err(ItchError::MissingApiKey) => {
                eprintln!("Set ITCH_API_KEY to your itch.io API key");
                std::process::exit(1);
            }
            Err(ItchError::MissingParameter { name }) => {
                eprintln!("Missing {} (set ITCH_GAME_ID for the game id)", name);
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Verification error: {}", e);
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = client.shutdown().await {
        eprintln!("Failed to flush verification cache: {}", e);
    }
}
