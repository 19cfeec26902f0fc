// HTTP sink — forwards reports to the SafeChat backend.
//
// The backend stores reported messages through
// `POST {base}/mensajes/guardarMensaje`; its field names are part of that
// wire contract. The request timeout lives on the reqwest client, so a
// hung backend turns into a failed report rather than a stuck CLI.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::traits::ReportSink;
use crate::analysis::AnalysisResult;

pub const REPORT_PATH: &str = "mensajes/guardarMensaje";

pub struct HttpSink {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpSink {
    /// Create a sink posting to `{base_url}/mensajes/guardarMensaje`.
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("safechat/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/{REPORT_PATH}", base_url.trim_end_matches('/')),
            token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReportSink for HttpSink {
    fn name(&self) -> &str {
        "http"
    }

    async fn submit(&self, message: &str, analysis: &AnalysisResult) -> Result<()> {
        let body = ReportRequest {
            message,
            label: analysis.status.label(),
            diagnosis: analysis.status.as_str(),
            analysis,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach report endpoint {}", self.endpoint))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Report endpoint returned {}: {}", status, body);
        }

        debug!(endpoint = %self.endpoint, "Report delivered");
        Ok(())
    }
}

// --- Backend request type ---

#[derive(Serialize)]
struct ReportRequest<'a> {
    #[serde(rename = "contenido")]
    message: &'a str,
    label: u8,
    #[serde(rename = "tipoDiagnostico")]
    diagnosis: &'a str,
    analysis: &'a AnalysisResult,
}
