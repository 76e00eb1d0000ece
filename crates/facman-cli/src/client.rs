//! Async HTTP client wrapping the facman JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use facman_core::{
  aggregate::{AnalysisReport, Dashboard, LegalReport},
  facility::FacilityDraft,
  snapshot::EnrichedFacility,
};
use reqwest::Client;
use uuid::Uuid;

/// Connection settings for the facman API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the facman JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  // ── Facilities ────────────────────────────────────────────────────────────

  /// `GET /facilities[?code=XX]`
  pub async fn facilities(&self, code: Option<&str>) -> Result<Vec<EnrichedFacility>> {
    let mut req = self.client.get(self.url("/facilities"));
    if let Some(code) = code {
      req = req.query(&[("code", code)]);
    }
    let resp = req.send().await.context("GET /facilities failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /facilities → {}", resp.status()));
    }
    resp.json().await.context("deserialising facilities")
  }

  /// `GET /facilities/{id}`
  pub async fn facility(&self, id: Uuid) -> Result<EnrichedFacility> {
    let resp = self
      .client
      .get(self.url(&format!("/facilities/{id}")))
      .send()
      .await
      .context("GET /facilities/{id} failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /facilities/{id} → {}", resp.status()));
    }
    resp.json().await.context("deserialising facility")
  }

  /// `PUT /facilities/{id}`
  pub async fn update(&self, id: Uuid, draft: &FacilityDraft) -> Result<EnrichedFacility> {
    let resp = self
      .client
      .put(self.url(&format!("/facilities/{id}")))
      .json(draft)
      .send()
      .await
      .context("PUT /facilities/{id} failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("PUT /facilities/{id} → {}", resp.status()));
    }
    resp.json().await.context("deserialising updated facility")
  }

  // ── Reports ───────────────────────────────────────────────────────────────

  /// `GET /dashboard`
  pub async fn dashboard(&self) -> Result<Dashboard> {
    let resp = self
      .client
      .get(self.url("/dashboard"))
      .send()
      .await
      .context("GET /dashboard failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /dashboard → {}", resp.status()));
    }
    resp.json().await.context("deserialising dashboard")
  }

  /// `GET /legal`
  pub async fn legal(&self) -> Result<LegalReport> {
    let resp = self
      .client
      .get(self.url("/legal"))
      .send()
      .await
      .context("GET /legal failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /legal → {}", resp.status()));
    }
    resp.json().await.context("deserialising legal report")
  }

  /// `GET /analysis`
  pub async fn analysis(&self) -> Result<AnalysisReport> {
    let resp = self
      .client
      .get(self.url("/analysis"))
      .send()
      .await
      .context("GET /analysis failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /analysis → {}", resp.status()));
    }
    resp.json().await.context("deserialising analysis report")
  }
}
