use api::Backend;
use dioxus::prelude::*;

/// The backend chosen at startup. The app root provides it with
/// `use_context_provider`.
pub fn use_backend() -> Backend {
    use_context::<Backend>()
}
