//! Element operations by DOM id.
//!
//! Every operation looks the element up again with `getElementById`,
//! so nothing here holds on to node handles between calls.

use std::time::{Duration, Instant};

use serde::Deserialize;
use serde_json::Value;

use crate::cdp::error::CdpError;

use super::core::PageSession;

pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shortest reply wait granted to a probe near the end of a polling window.
const MIN_PROBE_WAIT: Duration = Duration::from_millis(250);

/// Reply budget for one probe: what is left of the window, with a floor.
pub(super) fn probe_wait(start: Instant, timeout: Duration) -> Duration {
    timeout
        .saturating_sub(start.elapsed())
        .max(MIN_PROBE_WAIT)
}

/// What a script sees when it looks an element up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementState {
    Missing,
    Hidden,
    Disabled,
    Ready,
}

/// `id` as a JavaScript string literal.
pub(super) fn js_string(id: &str) -> String {
    Value::String(id.to_string()).to_string()
}

pub(super) fn state_script(id: &str) -> String {
    format!(
        r#"(() => {{
  const el = document.getElementById({id});
  if (!el) return "missing";
  const style = window.getComputedStyle(el);
  const rect = el.getBoundingClientRect();
  if (style.display === "none" || style.visibility === "hidden" || (rect.width === 0 && rect.height === 0)) return "hidden";
  if (el.disabled) return "disabled";
  return "ready";
}})()"#,
        id = js_string(id)
    )
}

pub(super) fn focus_and_clear_script(id: &str) -> String {
    format!(
        r#"(() => {{
  const el = document.getElementById({id});
  if (!el) return false;
  el.scrollIntoView({{block: "center"}});
  el.focus();
  if ("value" in el) {{
    el.value = "";
    el.dispatchEvent(new Event("input", {{bubbles: true}}));
  }}
  return true;
}})()"#,
        id = js_string(id)
    )
}

pub(super) fn commit_script(id: &str) -> String {
    format!(
        r#"(() => {{
  const el = document.getElementById({id});
  if (!el) return false;
  el.dispatchEvent(new Event("change", {{bubbles: true}}));
  return true;
}})()"#,
        id = js_string(id)
    )
}

pub(super) fn select_script(id: &str, value: &str) -> String {
    format!(
        r#"(() => {{
  const el = document.getElementById({id});
  if (!el) return "missing";
  if (!el.options) return "not_select";
  const value = {value};
  if (!Array.from(el.options).some(o => o.value === value)) return "no_option";
  el.value = value;
  el.dispatchEvent(new Event("input", {{bubbles: true}}));
  el.dispatchEvent(new Event("change", {{bubbles: true}}));
  return "ok";
}})()"#,
        id = js_string(id),
        value = js_string(value)
    )
}

pub(super) fn center_script(id: &str) -> String {
    format!(
        r#"(() => {{
  const el = document.getElementById({id});
  if (!el) return null;
  el.scrollIntoView({{block: "center"}});
  const r = el.getBoundingClientRect();
  return {{x: r.left + r.width / 2, y: r.top + r.height / 2}};
}})()"#,
        id = js_string(id)
    )
}

impl PageSession {
    pub async fn element_state(&self, id: &str) -> Result<ElementState, CdpError> {
        let value = self.evaluate(&state_script(id)).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn probe_state(
        &self,
        id: &str,
        start: Instant,
        timeout: Duration,
    ) -> Result<ElementState, CdpError> {
        let value = self
            .evaluate_within(&state_script(id), probe_wait(start, timeout))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Wait until an element with this id exists, visible or not.
    pub async fn wait_for_element(&self, id: &str, timeout: Duration) -> Result<(), CdpError> {
        let start = Instant::now();
        loop {
            if self.probe_state(id, start, timeout).await? != ElementState::Missing {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(CdpError::Timeout {
                    what: id.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait until the element is present, visible and enabled.
    ///
    /// On timeout the error names the last state seen.
    pub async fn wait_until_interactable(
        &self,
        id: &str,
        timeout: Duration,
    ) -> Result<(), CdpError> {
        let start = Instant::now();
        loop {
            let state = self.probe_state(id, start, timeout).await?;
            if state == ElementState::Ready {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(match state {
                    ElementState::Missing => CdpError::ElementNotFound(id.to_string()),
                    _ => CdpError::NotInteractable(format!("{} ({:?})", id, state)),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Replace the contents of a text input with `text`.
    pub async fn fill_by_id(&self, id: &str, text: &str) -> Result<(), CdpError> {
        if !self.evaluate_flag(&focus_and_clear_script(id)).await? {
            return Err(CdpError::ElementNotFound(id.to_string()));
        }
        if !text.is_empty() {
            self.type_text(text).await?;
        }
        if !self.evaluate_flag(&commit_script(id)).await? {
            return Err(CdpError::ElementNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Choose the option with this value in a select element.
    pub async fn select_by_id(&self, id: &str, value: &str) -> Result<(), CdpError> {
        let result = self.evaluate(&select_script(id, value)).await?;
        match result.as_str() {
            Some("ok") => Ok(()),
            Some("missing") => Err(CdpError::ElementNotFound(id.to_string())),
            Some("no_option") => Err(CdpError::OptionNotFound {
                element: id.to_string(),
                value: value.to_string(),
            }),
            Some("not_select") => Err(CdpError::NotInteractable(format!("{} is not a select", id))),
            _ => Err(CdpError::InvalidResponse(format!(
                "Unexpected select result: {}",
                result
            ))),
        }
    }

    /// Scroll the element into view and click its center.
    pub async fn click_by_id(&self, id: &str) -> Result<(), CdpError> {
        let center = self.evaluate(&center_script(id)).await?;
        let (Some(x), Some(y)) = (center["x"].as_f64(), center["y"].as_f64()) else {
            return Err(CdpError::ElementNotFound(id.to_string()));
        };
        self.click(x, y).await
    }

    async fn evaluate_flag(&self, script: &str) -> Result<bool, CdpError> {
        Ok(self.evaluate(script).await?.as_bool().unwrap_or(false))
    }
}
