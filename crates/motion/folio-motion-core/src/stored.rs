//! Declarative registry loader.
//!
//! Animation registries can be authored as JSON and installed in bulk, which
//! keeps page-specific choreography out of host code:
//!
//! ```json
//! {
//!   "bindings": [
//!     {
//!       "binding": { "selector": ".card", "kind": "OnHoverEnter", "once": false },
//!       "spec": {
//!         "targetSelector": ".card img",
//!         "ranges": [ { "property": "scale", "from": 1.0, "to": 1.1 } ],
//!         "duration": 400.0,
//!         "easing": { "PowerOut": 2 }
//!       }
//!     }
//!   ]
//! }
//! ```

use serde::Deserialize;

use crate::transition::{TransitionSpec, TriggerBinding};

#[derive(Debug, Deserialize)]
struct RegistryDoc {
    #[serde(default)]
    bindings: Vec<RegistryEntry>,
}

#[derive(Debug, Deserialize)]
struct RegistryEntry {
    binding: TriggerBinding,
    spec: TransitionSpec,
}

/// Parse a registry document into (binding, spec) pairs, validating each
/// spec's basic invariants. Callers feed the pairs to `Sequencer::register`.
pub fn parse_registry_json(s: &str) -> Result<Vec<(TriggerBinding, TransitionSpec)>, String> {
    let doc: RegistryDoc = serde_json::from_str(s).map_err(|e| format!("parse error: {e}"))?;
    let mut out = Vec::with_capacity(doc.bindings.len());
    for entry in doc.bindings {
        entry.spec.validate_basic()?;
        out.push((entry.binding, entry.spec));
    }
    Ok(out)
}
