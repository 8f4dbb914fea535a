//! MIME type to application associations
//!
//! Built once from the registry plus override directives; pure and
//! deterministic, so identical inputs always produce an identical index.

mod overrides;

use std::collections::BTreeMap;

use crate::registry::Registry;

pub use overrides::{OverrideAction, OverrideDirective, load_overrides, parse_overrides};

/// Ordered descriptor ids for one MIME type, plus an optional default
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssociationEntry {
    ids: Vec<String>,
    default_id: Option<String>,
}

impl AssociationEntry {
    fn add(&mut self, id: &str) {
        if !self.ids.iter().any(|existing| existing == id) {
            self.ids.push(id.to_string());
        }
    }

    fn remove(&mut self, id: &str) {
        self.ids.retain(|existing| existing != id);
        // Invariant: a set default always appears in the sequence.
        if self.default_id.as_deref() == Some(id) {
            self.default_id = None;
        }
    }

    fn set_default(&mut self, id: &str) {
        self.add(id);
        self.default_id = Some(id.to_string());
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn default_id(&self) -> Option<&str> {
        self.default_id.as_deref()
    }
}

/// Index from MIME type to its association entry
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssociationIndex {
    entries: BTreeMap<String, AssociationEntry>,
}

impl AssociationIndex {
    /// Build the index: registry declarations first (discovery order), then
    /// overrides in declaration order. Later overrides win conflicts.
    pub fn build(registry: &Registry, overrides: &[OverrideDirective]) -> Self {
        let mut index = Self::default();

        for descriptor in registry.iter() {
            for mime_type in &descriptor.mime_types {
                index.entry(mime_type).add(&descriptor.id);
            }
        }

        for directive in overrides {
            match directive.action {
                OverrideAction::Add => index.entry(&directive.mime_type).add(&directive.id),
                OverrideAction::Remove => {
                    if let Some(entry) = index.entries.get_mut(&directive.mime_type) {
                        entry.remove(&directive.id);
                    }
                }
                OverrideAction::Default => {
                    index.entry(&directive.mime_type).set_default(&directive.id)
                }
            }
        }

        tracing::debug!(
            mime_types = index.entries.len(),
            overrides = overrides.len(),
            "association index built"
        );
        index
    }

    fn entry(&mut self, mime_type: &str) -> &mut AssociationEntry {
        self.entries.entry(mime_type.to_string()).or_default()
    }

    pub fn get(&self, mime_type: &str) -> Option<&AssociationEntry> {
        self.entries.get(mime_type)
    }
}
