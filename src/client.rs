//! Storage adapter for clients of the REST API.
//!
//! Mirrors what the browser client does against the backend: every
//! operation calls the corresponding endpoint and swallows transport
//! and parse failures, handing back an empty or null default instead.
//! Callers cannot tell "no data" apart from "request failed"; that is
//! the adapter's contract.

use crate::dto::result_dto::CreateResultPayload;
use crate::dto::test_dto::CreateTestPayload;
use crate::models::result::TestResult;
use crate::models::test::Test;
use crate::services::result_service::{HistoryEntry, ResultStats};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

#[derive(Clone)]
pub struct StorageClient {
    client: Client,
    base_url: String,
}

impl StorageClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn get_tests(&self) -> Vec<Test> {
        self.get_field("/api/tests", "tests")
            .await
            .unwrap_or_default()
    }

    pub async fn get_test(&self, id: &str) -> Option<Test> {
        self.get_field(&format!("/api/tests/{}", id), "test").await
    }

    /// Create-or-update: looks the test up by id first and issues an
    /// update when it exists, a create otherwise. Returns whether the
    /// write went through.
    pub async fn save_test(&self, test: &CreateTestPayload) -> bool {
        let body = match self.get_test(&test.id).await {
            Some(_) => {
                self.send_json(
                    self.client
                        .put(format!("{}/api/tests/{}", self.base_url, test.id)),
                    test,
                )
                .await
            }
            None => {
                self.send_json(
                    self.client.post(format!("{}/api/tests", self.base_url)),
                    test,
                )
                .await
            }
        };
        body.is_some()
    }

    pub async fn delete_test(&self, id: &str) -> bool {
        let resp = self
            .client
            .delete(format!("{}/api/tests/{}", self.base_url, id))
            .send()
            .await;
        match resp {
            Ok(r) => r.status().is_success(),
            Err(_) => false,
        }
    }

    pub async fn save_result(&self, result: &CreateResultPayload) -> Option<TestResult> {
        let body = self
            .send_json(
                self.client.post(format!("{}/api/results", self.base_url)),
                result,
            )
            .await?;
        field(&body, "result")
    }

    pub async fn get_results(&self, test_id: &str) -> (Vec<TestResult>, ResultStats) {
        let path = format!("/api/results/test/{}", test_id);
        match self.get_envelope(&path).await {
            Some(body) => {
                let results = field(&body, "results").unwrap_or_default();
                let stats = field(&body, "stats").unwrap_or_else(ResultStats::empty);
                (results, stats)
            }
            None => (Vec::new(), ResultStats::empty()),
        }
    }

    pub async fn get_result(&self, attempt_id: &str) -> Option<TestResult> {
        self.get_field(&format!("/api/results/{}", attempt_id), "result")
            .await
    }

    pub async fn get_history(&self) -> BTreeMap<String, HistoryEntry> {
        self.get_field("/api/results/history", "history")
            .await
            .unwrap_or_default()
    }

    async fn get_field<T: DeserializeOwned>(&self, path: &str, name: &str) -> Option<T> {
        let body = self.get_envelope(path).await?;
        field(&body, name)
    }

    async fn get_envelope(&self, path: &str) -> Option<JsonValue> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).send().await.ok()?;
        parse_envelope(resp).await
    }

    async fn send_json<T: serde::Serialize>(
        &self,
        request: reqwest::RequestBuilder,
        payload: &T,
    ) -> Option<JsonValue> {
        let resp = request.json(payload).send().await.ok()?;
        parse_envelope(resp).await
    }
}

async fn parse_envelope(resp: reqwest::Response) -> Option<JsonValue> {
    let body = resp.json::<JsonValue>().await.ok()?;
    if body.get("success").and_then(JsonValue::as_bool) == Some(true) {
        Some(body)
    } else {
        None
    }
}

fn field<T: DeserializeOwned>(body: &JsonValue, name: &str) -> Option<T> {
    serde_json::from_value(body.get(name)?.clone()).ok()
}
