//! HTTP client for the natural-language planning service.
//!
//! One prompt submission becomes one `POST /api/visualize` carrying the
//! prompt and, if a spec is selected, its prior declarative intent. The
//! service never needs previously computed rows, so `data`, `insights` and
//! the id are not echoed back.

use anyhow::{Context, Result};
use reqwest::blocking::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::spec::{Encoding, Record, Style, VisualizationSpec, VizKind};
use crate::store::VizAction;

/// Prior declarative intent of the selected spec, as the service expects it.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentViz {
    pub viz_type: VizKind,
    pub encoding: Encoding,
    pub style: Style,
    pub transforms: Vec<Value>,
}

/// Request body for one prompt submission.
#[derive(Debug, Clone, Serialize)]
pub struct VisualizeRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_viz_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_viz: Option<CurrentViz>,
}

impl VisualizeRequest {
    pub fn new(prompt: &str, active: Option<&VisualizationSpec>) -> Self {
        VisualizeRequest {
            prompt: prompt.to_string(),
            target_viz_id: active.map(|spec| spec.id.clone()),
            current_viz: active.map(|spec| CurrentViz {
                viz_type: spec.kind,
                encoding: spec.encoding.clone(),
                style: spec.style.clone(),
                transforms: spec.transforms.clone(),
            }),
        }
    }
}

/// Raw response shape. Missing optional collections default to empty rather
/// than null, so downstream code never has to null-check them.
#[derive(Debug, Clone, Deserialize)]
pub struct VisualizeResponse {
    pub viz_id: String,
    pub action: ResponseAction,
    #[serde(default)]
    pub target_viz_id: Option<String>,
    pub viz_type: VizKind,
    #[serde(default)]
    pub encoding: Encoding,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub transforms: Vec<Value>,
    #[serde(default)]
    pub data: Vec<Record>,
    #[serde(default)]
    pub insights: Map<String, Value>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ResponseAction {
    #[serde(rename = "new_visualization")]
    New,
    #[serde(rename = "update_visualization")]
    Update,
}

impl VisualizeResponse {
    /// Turn the response into the store action it declares. For updates the
    /// service sets `viz_id` to the target id, so updates key on `viz_id`.
    pub fn into_action(self) -> VizAction {
        let spec = VisualizationSpec {
            id: self.viz_id,
            kind: self.viz_type,
            encoding: self.encoding,
            style: self.style,
            transforms: self.transforms,
            data: self.data,
            insights: self.insights,
            errors: self.errors,
        };
        match self.action {
            ResponseAction::New => VizAction::Create(spec),
            ResponseAction::Update => VizAction::Update(spec.id.clone(), spec),
        }
    }
}

/// Blocking client for the planning service.
#[derive(Debug, Clone)]
pub struct VizClient {
    http: HttpClient,
    base_url: String,
}

impl VizClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(concat!("promptviz/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(VizClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Submit one prompt and return the action the service declared.
    ///
    /// Any non-success status or transport failure comes back as a single
    /// human-readable error; the caller's collection state is untouched.
    pub fn visualize(
        &self,
        prompt: &str,
        active: Option<&VisualizationSpec>,
    ) -> Result<VizAction> {
        let request = VisualizeRequest::new(prompt, active);
        debug!(target_viz_id = ?request.target_viz_id, "submitting prompt");

        let response: VisualizeResponse = self
            .http
            .post(format!("{}/api/visualize", self.base_url))
            .json(&request)
            .send()
            .context("Visualization service is unreachable")?
            .error_for_status()
            .context("Visualization service returned an error")?
            .json()
            .context("Visualization service returned an unreadable response")?;

        Ok(response.into_action())
    }

    /// Liveness probe against the service.
    pub fn health(&self) -> Result<()> {
        self.http
            .get(format!("{}/api/health", self.base_url))
            .send()
            .context("Visualization service is unreachable")?
            .error_for_status()
            .context("Visualization service is unhealthy")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_data_and_id() {
        let mut spec = VisualizationSpec::new("v1", VizKind::Bar);
        spec.encoding.x = Some("year".to_string());
        spec.transforms = vec![json!({"op": "sort", "by": ["year"]})];
        spec.data = vec![json!({"year": 2020}).as_object().unwrap().clone()];

        let body = serde_json::to_value(VisualizeRequest::new("make it red", Some(&spec))).unwrap();
        assert_eq!(body["prompt"], "make it red");
        assert_eq!(body["target_viz_id"], "v1");
        assert_eq!(body["current_viz"]["viz_type"], "bar");
        assert_eq!(body["current_viz"]["encoding"]["x"], "year");
        assert_eq!(body["current_viz"]["transforms"][0]["op"], "sort");
        // Computed rows and identity never travel back to the service.
        assert!(body["current_viz"].get("data").is_none());
        assert!(body["current_viz"].get("id").is_none());
    }

    #[test]
    fn test_request_without_selection() {
        let body = serde_json::to_value(VisualizeRequest::new("top sectors", None)).unwrap();
        assert!(body.get("target_viz_id").is_none());
        assert!(body.get("current_viz").is_none());
    }

    #[test]
    fn test_response_defaults_missing_collections() {
        let response: VisualizeResponse = serde_json::from_value(json!({
            "viz_id": "v9",
            "action": "new_visualization",
            "viz_type": "table",
        }))
        .unwrap();
        assert!(response.transforms.is_empty());
        assert!(response.data.is_empty());
        assert!(response.insights.is_empty());
        assert!(response.errors.is_empty());

        match response.into_action() {
            VizAction::Create(spec) => assert_eq!(spec.id, "v9"),
            VizAction::Update(..) => panic!("expected create"),
        }
    }

    #[test]
    fn test_update_action_keys_on_viz_id() {
        let response: VisualizeResponse = serde_json::from_value(json!({
            "viz_id": "v3",
            "action": "update_visualization",
            "target_viz_id": "v3",
            "viz_type": "pie",
        }))
        .unwrap();
        match response.into_action() {
            VizAction::Update(id, spec) => {
                assert_eq!(id, "v3");
                assert_eq!(spec.id, "v3");
            }
            VizAction::Create(_) => panic!("expected update"),
        }
    }
}
