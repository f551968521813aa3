// Re-export the public API from the appropriate module
#[cfg(target_arch = "wasm32")]
pub use wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm32::*;

#[cfg(target_arch = "wasm32")]
pub mod wasm32 {
    use api::wallet::WalletError;
    use api::wallet::WalletProvider;
    use js_sys::Reflect;
    use serde_json::json;
    use serde_json::Value;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    /// Blocking `window.prompt`. `None` if dismissed or unavailable.
    pub fn prompt(message: &str) -> Option<String> {
        web_sys::window()?.prompt_with_message(message).ok()?
    }

    /// The EIP-1193 provider a wallet extension injects as `window.ethereum`.
    #[derive(Clone, Debug)]
    pub struct InjectedProvider {
        ethereum: JsValue,
    }

    /// Looks up `window.ethereum`.
    pub fn injected_provider() -> Option<InjectedProvider> {
        let window = web_sys::window()?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            None
        } else {
            Some(InjectedProvider { ethereum })
        }
    }

    fn js_error(err: JsValue) -> WalletError {
        WalletError::Js(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
    }

    // providers reject with `{ code, message }`
    fn provider_error(err: JsValue) -> WalletError {
        let code = Reflect::get(&err, &JsValue::from_str("code"))
            .ok()
            .and_then(|c| c.as_f64());
        let message = Reflect::get(&err, &JsValue::from_str("message"))
            .ok()
            .and_then(|m| m.as_string());
        match (code, message) {
            (Some(code), Some(message)) => WalletError::Rpc {
                code: code as i64,
                message,
            },
            _ => js_error(err),
        }
    }

    impl WalletProvider for InjectedProvider {
        async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
            let args = json!({ "method": method, "params": params });
            let args = js_sys::JSON::parse(&args.to_string()).map_err(js_error)?;

            let request: js_sys::Function =
                Reflect::get(&self.ethereum, &JsValue::from_str("request"))
                    .map_err(js_error)?
                    .dyn_into()
                    .map_err(|_| WalletError::Js("provider.request is not a function".into()))?;

            let promise: js_sys::Promise = request
                .call1(&self.ethereum, &args)
                .map_err(provider_error)?
                .dyn_into()
                .map_err(|_| WalletError::Js("provider.request did not return a promise".into()))?;

            let result = JsFuture::from(promise).await.map_err(provider_error)?;
            if result.is_undefined() || result.is_null() {
                return Ok(Value::Null);
            }

            let text: String = js_sys::JSON::stringify(&result).map_err(js_error)?.into();
            serde_json::from_str(&text).map_err(|e| WalletError::Js(e.to_string()))
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod non_wasm32 {
    use api::wallet::WalletError;
    use api::wallet::WalletProvider;
    use serde_json::Value;

    /// There is no browser to prompt in.
    pub fn prompt(_message: &str) -> Option<String> {
        None
    }

    /// Stand-in so the crate builds off the web; never found.
    #[derive(Clone, Debug)]
    pub struct InjectedProvider;

    pub fn injected_provider() -> Option<InjectedProvider> {
        None
    }

    impl WalletProvider for InjectedProvider {
        async fn request(&self, _method: &str, _params: Value) -> Result<Value, WalletError> {
            Err(WalletError::NoProvider)
        }
    }
}
