use pricing_service::config::{PricingConfig, ScrapingBeeConfig};
use pricing_service::startup::Application;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the service on a random port against the given ScrapingBee base URL.
    pub async fn spawn(scrapingbee_base_url: &str) -> Self {
        let config = PricingConfig {
            common: CoreConfig { port: 0 },
            scrapingbee: ScrapingBeeConfig {
                api_key: Secret::new("sb_test_key".to_string()),
                base_url: scrapingbee_base_url.to_string(),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_best_prices(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/best-prices", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to send /best-prices request")
    }
}
