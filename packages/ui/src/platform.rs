//! Thin wrappers over browser APIs with native fallbacks, so components stay
//! free of `cfg(target_arch)` noise.

use std::time::Duration;

/// Sleep that works on both the browser event loop and a tokio runtime.
pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Blocking browser alert; logged on native targets.
pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
            return;
        }
    }
    tracing::info!(%message, "alert");
}

/// Blocking browser confirm dialog. Native targets auto-confirm, which keeps
/// the flows exercisable in tests.
pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        return web_sys::window()
            .map(|w| w.confirm_with_message(message).unwrap_or(false))
            .unwrap_or(false);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!(%message, "confirm auto-accepted");
        true
    }
}
