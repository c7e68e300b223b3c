//! Catalog of backend models the chat service is known to route to.
//!
//! The client treats model ids as opaque strings and never checks them
//! against this list. It exists so front ends can offer a choice.

/// A model the backend maps a selection id onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownModel {
    /// Id sent as `selectedModelId`.
    pub id: &'static str,
    /// Backend model name.
    pub name: &'static str,
}

/// Models recognized by the default backend.
pub const KNOWN_MODELS: &[KnownModel] = &[
    KnownModel {
        id: "0",
        name: "gemini-2.0-flash-lite",
    },
    KnownModel {
        id: "1",
        name: "gemini-2.0-flash",
    },
    KnownModel {
        id: "2",
        name: "gemini-2.5-pro-exp-03-25",
    },
];

/// Id the backend falls back to for empty or unknown selections.
pub const DEFAULT_MODEL_ID: &str = "1";

/// Look up a known model by its selection id.
pub fn find_model(id: &str) -> Option<&'static KnownModel> {
    KNOWN_MODELS.iter().find(|m| m.id == id)
}
