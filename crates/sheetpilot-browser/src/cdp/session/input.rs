//! Mouse and keyboard input for CDP page session.

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{MouseButton, MouseEventType};

use super::core::PageSession;

impl PageSession {
    /// Click at viewport coordinates.
    pub async fn click(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": MouseEventType::MouseMoved,
                "x": x,
                "y": y,
                "button": MouseButton::None,
            })),
        )
        .await?;

        for event in [MouseEventType::MousePressed, MouseEventType::MouseReleased] {
            self.call(
                "Input.dispatchMouseEvent",
                Some(json!({
                    "type": event,
                    "x": x,
                    "y": y,
                    "button": MouseButton::Left,
                    "clickCount": 1,
                })),
            )
            .await?;
        }

        debug!("Clicked at ({}, {})", x, y);
        Ok(())
    }

    /// Insert text at the focused element, as if typed.
    pub async fn type_text(&self, text: &str) -> Result<(), CdpError> {
        self.call("Input.insertText", Some(json!({"text": text})))
            .await?;
        debug!("Typed {} characters", text.chars().count());
        Ok(())
    }
}
