//! Browser `localStorage` access. Native builds keep nothing between runs.

pub const REFRESH_TOKEN_KEY: &str = "clubconnect.refresh_token";
pub const FEDERATED_SESSION_KEY: &str = "clubconnect.federated_session";

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(target_arch = "wasm32")]
pub fn load(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
pub fn save(key: &str, value: Option<&str>) {
    let Some(storage) = local_storage() else {
        return;
    };
    let result = match value {
        Some(value) => storage.set_item(key, value),
        None => storage.remove_item(key),
    };
    if result.is_err() {
        tracing::warn!("could not write {key} to localStorage");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_key: &str, _value: Option<&str>) {}

/// Full URL of the current page.
pub fn current_href() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()?.location().href().ok()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Leave the app for an external URL.
pub fn redirect_to(url: &str) {
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        if window.location().set_href(url).is_err() {
            tracing::error!("could not navigate to {url}");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!("external navigation to {url} is only supported in the browser");
}
