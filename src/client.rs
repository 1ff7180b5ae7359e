//! PageSpeed Insights API client and raw response shapes.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use crate::core::constants::api;
use crate::core::error::Result;

/// Device simulation mode used for the analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceProfile {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceProfile {
    /// Strategy query parameter value understood by the PSI API.
    pub fn strategy(&self) -> &'static str {
        match self {
            DeviceProfile::Desktop => "DESKTOP",
            DeviceProfile::Mobile => "MOBILE",
        }
    }
}

/// Requests a page analysis. The orchestrator treats any error as
/// retryable up to its budget; error kinds are not distinguished.
#[async_trait]
pub trait FetchAnalysis: Send + Sync {
    async fn fetch(&self, url: &str, profile: DeviceProfile) -> Result<AnalysisResponse>;
}

/// Raw response of the PSI v5 runPagespeed call, reduced to the fields
/// the report builder consumes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    /// URL of the analyzed page, canonicalized by PSI
    pub id: String,
    pub lighthouse_result: LighthouseResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LighthouseResult {
    pub categories: RawCategories,
    /// Audit id to audit data, referenced from the categories
    #[serde(default)]
    pub audits: HashMap<String, RawAudit>,
}

/// The category slots PSI can return. Categories that weren't requested
/// (or that Lighthouse dropped, like PWA) are simply absent.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCategories {
    pub performance: Option<RawCategory>,
    pub accessibility: Option<RawCategory>,
    #[serde(rename = "best-practices")]
    pub best_practices: Option<RawCategory>,
    pub seo: Option<RawCategory>,
    pub pwa: Option<RawCategory>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategory {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Fractional score in [0, 1], or null when the category isn't scored
    #[serde(default)]
    pub score: Option<Value>,
    #[serde(default)]
    pub audit_refs: Vec<AuditRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditRef {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAudit {
    #[serde(default)]
    pub title: String,
    /// Fractional score in [0, 1], or null for informational audits
    #[serde(default)]
    pub score: Option<Value>,
    #[serde(default)]
    pub display_value: Option<String>,
    /// Free-form type-tagged details payload
    #[serde(default)]
    pub details: Option<Value>,
}

/// HTTP client for the PageSpeed Insights API.
pub struct PsiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl PsiClient {
    /// Builds a client with the given request timeout and optional API key.
    /// `endpoint` overrides the production PSI endpoint (used by tests).
    pub fn new(
        timeout: Duration,
        api_key: Option<String>,
        endpoint: Option<String>,
    ) -> Result<Self> {
        let user_agent = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.unwrap_or_else(|| api::PSI_ENDPOINT.to_string()),
            api_key,
        })
    }
}

#[async_trait]
impl FetchAnalysis for PsiClient {
    async fn fetch(&self, url: &str, profile: DeviceProfile) -> Result<AnalysisResponse> {
        let mut query: Vec<(&str, &str)> = vec![("url", url), ("strategy", profile.strategy())];
        for category in api::CATEGORY_PARAMS {
            query.push(("category", category));
        }
        if let Some(ref key) = self.api_key {
            query.push(("key", key));
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<AnalysisResponse>().await?)
    }
}
