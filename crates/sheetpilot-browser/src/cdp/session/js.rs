//! JavaScript execution for CDP page session.

use std::time::Duration;

use serde_json::{Value, json};

use crate::cdp::client::COMMAND_TIMEOUT;
use crate::cdp::error::CdpError;

use super::core::PageSession;

impl PageSession {
    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        self.evaluate_within(expression, COMMAND_TIMEOUT).await
    }

    /// Evaluate with the reply wait bounded by `timeout`.
    pub async fn evaluate_within(
        &self,
        expression: &str,
        timeout: Duration,
    ) -> Result<Value, CdpError> {
        let result = self
            .call_within(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
                timeout,
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let text = exception["exception"]["description"]
                .as_str()
                .or_else(|| exception["text"].as_str())
                .unwrap_or("Unknown error");
            return Err(CdpError::JavaScript(text.to_string()));
        }

        Ok(result["result"]["value"].clone())
    }
}
