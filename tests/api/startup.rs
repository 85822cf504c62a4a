//! Builds the app the way `main` does, from the shipped config files.

use std::path::PathBuf;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde_json::json;
use waitlist::{
    config::{AppConfig, Environment, StoreBackend},
    App,
};

#[tokio::test]
async fn app_from_local_config_serves_subscriptions() -> Result<()> {
    let config_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config");
    let mut config = AppConfig::load(config_dir, Environment::Local)?;
    assert_eq!(config.store_config.backend, StoreBackend::Memory);
    // Let the OS pick a free port.
    config.net_config.app_port = 0;

    let app = App::build_from_config(&config).await?;
    let addr = app.listener.local_addr()?;
    tokio::spawn(waitlist::serve(app));

    let res = Client::new()
        .post(format!("http://{addr}/api/subscribe"))
        .json(&json!({ "email": "user@example.com" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, r#"{"status":"In the Loop"}"#);

    Ok(())
}
