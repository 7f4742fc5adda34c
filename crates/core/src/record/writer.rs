//! Pushes computed values back onto ticket records.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use super::store::RecordStore;
use super::types::PropertyUpdate;
use super::RecordError;

/// Writes a single value onto a named record property.
///
/// Properties listed as link fields receive the value as a URL; every other
/// property receives it as plain text.
#[derive(Clone)]
pub struct RecordWriter {
    store: Arc<dyn RecordStore>,
    link_fields: HashSet<String>,
}

impl RecordWriter {
    pub fn new(store: Arc<dyn RecordStore>, link_fields: impl IntoIterator<Item = String>) -> Self {
        Self {
            store,
            link_fields: link_fields.into_iter().collect(),
        }
    }

    pub fn is_link_field(&self, field: &str) -> bool {
        self.link_fields.contains(field)
    }

    pub async fn set_ticket_field(
        &self,
        id: &str,
        field: &str,
        value: &str,
    ) -> Result<(), RecordError> {
        let update = if self.is_link_field(field) {
            PropertyUpdate::Url(value.to_string())
        } else {
            PropertyUpdate::RichText(value.to_string())
        };

        self.store
            .update(id, field, update)
            .await
            .map_err(|source| RecordError::Update {
                id: id.to_string(),
                field: field.to_string(),
                source,
            })?;

        info!("Updated record {} with {}: {}", id, field, value);
        Ok(())
    }
}
