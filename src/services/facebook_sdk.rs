//! Bindings to the Facebook JavaScript SDK
//!
//! The SDK lives on `window.FB` once its script has loaded. Its methods take
//! completion callbacks; each call is wrapped in a `js_sys::Promise` whose
//! `resolve` function is passed as the callback, then awaited as a future.

use async_trait::async_trait;

use crate::controllers::handshake::{HandshakeError, IdentitySdk, LoginStatusResponse};

#[cfg(target_family = "wasm")]
use wasm_bindgen::{JsCast, JsValue};

/// `window.FB`
#[derive(Clone, Copy, Debug, Default)]
pub struct FacebookSdk;

/// Whether `window.FB` exists
pub fn is_sdk_loaded() -> bool {
    #[cfg(target_family = "wasm")]
    {
        fb_object().is_some()
    }
    #[cfg(not(target_family = "wasm"))]
    {
        false
    }
}

/// Append the SDK loader script to the document. The app id in the URL
/// fragment makes the SDK initialise itself once loaded.
pub fn inject_sdk(app_id: &str, version: &str) -> Result<(), String> {
    if app_id.is_empty() {
        log::warn!("No Facebook app id configured; login button will stay hidden");
        return Ok(());
    }

    #[cfg(target_family = "wasm")]
    {
        const SCRIPT_ID: &str = "facebook-jssdk";

        let window = web_sys::window().ok_or("No window object")?;
        let document = window.document().ok_or("No document")?;
        if document.get_element_by_id(SCRIPT_ID).is_some() {
            return Ok(());
        }

        let script = document
            .create_element("script")
            .map_err(|e| format!("Failed to create script element: {:?}", e))?;
        script.set_id(SCRIPT_ID);
        script
            .set_attribute("src", &sdk_url(app_id, version))
            .map_err(|e| format!("Failed to set script src: {:?}", e))?;
        script.set_attribute("async", "true").ok();

        let body = document.body().ok_or("No body")?;
        body.append_child(&script)
            .map_err(|e| format!("Failed to inject Facebook SDK: {:?}", e))?;
        log::info!("Injected Facebook SDK loader");
    }
    #[cfg(not(target_family = "wasm"))]
    {
        log::debug!("Skipping Facebook SDK injection for {} {} outside the browser", app_id, version);
    }

    Ok(())
}

/// Loader URL for a given app id and Graph API version
pub fn sdk_url(app_id: &str, version: &str) -> String {
    format!(
        "https://connect.facebook.net/en_US/sdk.js#xfbml=1&version={}&appId={}",
        urlencoding::encode(version),
        urlencoding::encode(app_id)
    )
}

#[cfg(target_family = "wasm")]
fn fb_object() -> Option<js_sys::Object> {
    let window = web_sys::window()?;
    let fb = js_sys::Reflect::get(&window, &JsValue::from_str("FB")).ok()?;
    if fb.is_undefined() || fb.is_null() {
        return None;
    }
    fb.dyn_into::<js_sys::Object>().ok()
}

/// Call `FB[method](...args, callback)` and await the callback's argument
#[cfg(target_family = "wasm")]
async fn call_with_callback(method: &str, args: &[JsValue]) -> Result<JsValue, HandshakeError> {
    let fb = fb_object().ok_or(HandshakeError::NotReady)?;
    let function: js_sys::Function = js_sys::Reflect::get(&fb, &JsValue::from_str(method))
        .map_err(|e| HandshakeError::Sdk(format!("FB.{} lookup failed: {:?}", method, e)))?
        .dyn_into()
        .map_err(|_| HandshakeError::Sdk(format!("FB.{} is not a function", method)))?;

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let call_args = js_sys::Array::new();
        for arg in args {
            call_args.push(arg);
        }
        call_args.push(&resolve);
        if let Err(e) = function.apply(&fb, &call_args) {
            reject.call1(&JsValue::NULL, &e).ok();
        }
    });

    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|e| HandshakeError::Sdk(format!("FB.{} failed: {:?}", method, e)))
}

#[async_trait(?Send)]
impl IdentitySdk for FacebookSdk {
    fn is_loaded(&self) -> bool {
        is_sdk_loaded()
    }

    async fn get_login_status(&self) -> Result<LoginStatusResponse, HandshakeError> {
        #[cfg(target_family = "wasm")]
        {
            let value = call_with_callback("getLoginStatus", &[]).await?;
            serde_wasm_bindgen::from_value(value)
                .map_err(|e| HandshakeError::MalformedResponse(e.to_string()))
        }
        #[cfg(not(target_family = "wasm"))]
        {
            Err(HandshakeError::NotReady)
        }
    }

    async fn api(&self, path: &str) -> Result<serde_json::Value, HandshakeError> {
        #[cfg(target_family = "wasm")]
        {
            let value = call_with_callback("api", &[JsValue::from_str(path)]).await?;
            serde_wasm_bindgen::from_value(value)
                .map_err(|e| HandshakeError::MalformedResponse(e.to_string()))
        }
        #[cfg(not(target_family = "wasm"))]
        {
            let _ = path;
            Err(HandshakeError::NotReady)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_url_carries_app_id_and_version() {
        assert_eq!(
            sdk_url("12345", "v2.8"),
            "https://connect.facebook.net/en_US/sdk.js#xfbml=1&version=v2.8&appId=12345"
        );
    }

    #[test]
    fn test_sdk_absent_outside_browser() {
        assert!(!FacebookSdk.is_loaded());
        assert!(inject_sdk("", "v2.8").is_ok());
    }
}
