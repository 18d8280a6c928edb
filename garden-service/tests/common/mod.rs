use garden_service::config::{GardenConfig, GoogleConfig, ModelConfig};
use garden_service::services::metrics::init_metrics;
use garden_service::startup::Application;
use serde_json::Value;
use service_core::config::Config;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the app against a stand-in generative-language API.
    pub async fn spawn(api_base: &str) -> Self {
        init_metrics();

        let config = GardenConfig {
            common: Config { port: 0 },
            google: GoogleConfig {
                api_key: "test-key".to_string(),
                api_base: api_base.to_string(),
            },
            models: ModelConfig {
                text_model: "gemini-1.5-flash".to_string(),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(app.run_until_stopped());

        let client = reqwest::Client::new();

        // Wait for the server to come up
        for _ in 0..50 {
            if let Ok(response) = client.get(format!("{}/health", address)).send().await {
                if response.status().is_success() {
                    break;
                }
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }

        Self { address, client }
    }

    pub async fn post_garden_chat(&self, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}/garden-chat", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
