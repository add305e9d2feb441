use crate::domain::ports::WebhookService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::error;

pub struct HttpWebhookService {
    client: Client,
    url: String,
}

impl HttpWebhookService {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_else(|_| Client::new()),
            url,
        }
    }
}

#[async_trait]
impl WebhookService for HttpWebhookService {
    async fn notify(&self, payload: &Value) -> Result<(), AppError> {
        let res = self.client.post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Webhook connection error: {}", e);
                error!("{}", msg);
                AppError::Upstream(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Webhook failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::Upstream(msg));
        }

        Ok(())
    }
}
