//! Mapping of canonical rows onto form element ids.

use std::time::Duration;

use sheetpilot_config::FormConfig;
use sheetpilot_protocols::CanonicalRow;

/// Element ids and timing of the timesheet form.
#[derive(Debug, Clone)]
pub struct FormTemplate {
    pub url: String,
    pub ready_element: String,
    pub add_row_element: String,
    pub application_field: String,
    pub project_field: String,
    pub activity_field: String,
    pub page_load_timeout: Duration,
    pub element_timeout: Duration,
}

impl Default for FormTemplate {
    fn default() -> Self {
        Self::from(&FormConfig::default())
    }
}

impl From<&FormConfig> for FormTemplate {
    fn from(config: &FormConfig) -> Self {
        Self {
            url: config.url.clone(),
            ready_element: config.ready_element.clone(),
            add_row_element: config.add_row_element.clone(),
            application_field: config.fields.application.clone(),
            project_field: config.fields.project.clone(),
            activity_field: config.fields.activity.clone(),
            page_load_timeout: config.page_load_timeout(),
            element_timeout: config.element_timeout(),
        }
    }
}

/// How a value reaches its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    /// Clear the text input, then type.
    Type,
    /// Pick the dropdown option with this value.
    Select,
}

/// One planned write into the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWrite {
    pub element_id: String,
    pub action: FieldAction,
    pub value: String,
}

impl FieldWrite {
    fn typed(element_id: String, value: &str) -> Self {
        Self {
            element_id,
            action: FieldAction::Type,
            value: value.to_string(),
        }
    }
}

impl FormTemplate {
    pub fn application_id(&self, row: usize) -> String {
        format!("{}{}", self.application_field, row)
    }

    pub fn project_id(&self, row: usize) -> String {
        format!("{}{}", self.project_field, row)
    }

    pub fn activity_id(&self, row: usize) -> String {
        format!("{}{}", self.activity_field, row)
    }

    /// Writes for form row `index` (1-based), in the order they are applied:
    /// application, project, activity (skipped when empty), then the
    /// populated hour slots Monday to Friday.
    pub fn plan_row_writes(&self, row: &CanonicalRow, index: usize) -> Vec<FieldWrite> {
        let mut writes = Vec::with_capacity(3 + row.hours.len());

        writes.push(FieldWrite::typed(self.application_id(index), &row.application));
        writes.push(FieldWrite::typed(self.project_id(index), &row.project));

        if !row.activity.is_empty() {
            writes.push(FieldWrite {
                element_id: self.activity_id(index),
                action: FieldAction::Select,
                value: row.activity.clone(),
            });
        }

        for (slot, value) in row.hours.iter() {
            writes.push(FieldWrite::typed(slot.element_id(index), value));
        }

        writes
    }
}
