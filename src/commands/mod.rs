//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod column;
mod item;
mod persistence;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

fn to_args<A: Serialize>(args: &A) -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())
}

/// Invoke a command and decode its result; a rejected promise becomes the backend's message
async fn call<R: DeserializeOwned>(cmd: &str, args: JsValue) -> Result<R, String> {
    let result = invoke(cmd, args)
        .await
        .map_err(|e| e.as_string().unwrap_or_else(|| format!("{} failed: {:?}", cmd, e)))?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

// Re-export all public items
pub use column::*;
pub use item::*;
pub use persistence::*;
