//! Browser implementation backed by `web-sys`.

use super::marshal::{gtag_args, GtagArg};
use crate::provider::HostContext;
use crate::script::ScriptTag;
use js_sys::{Array, Date, Function, Reflect};
use keiko_events::{Command, CommandQueue};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlScriptElement, Node};

/// Global the vendor loader drains.
const DATA_LAYER: &str = "dataLayer";

/// Global command function pushing its `arguments` object onto the data layer.
const GTAG: &str = "gtag";

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Host backed by the real `window` and `document`.
pub struct BrowserHost;

impl HostContext for BrowserHost {
    fn has_host_context(&self) -> bool {
        document().is_some()
    }

    fn current_url(&self) -> Option<String> {
        web_sys::window()?.location().href().ok()
    }

    fn current_title(&self) -> Option<String> {
        Some(document()?.title())
    }

    fn referrer(&self) -> Option<String> {
        Some(document()?.referrer())
    }

    fn insert_script_tag(&self, tag: &ScriptTag) -> bool {
        let Some(document) = document() else {
            return false;
        };
        let Some(anchor) = document.get_elements_by_tag_name("script").item(0) else {
            return false;
        };
        let Some(parent) = anchor.parent_node() else {
            return false;
        };

        let Ok(Ok(script)) = document
            .create_element("script")
            .map(|element| element.dyn_into::<HtmlScriptElement>())
        else {
            return false;
        };
        script.set_type(&tag.script_type);
        script.set_async(tag.async_load);
        script.set_defer(tag.defer);
        script.set_src(&tag.src);

        let anchor: &Node = anchor.as_ref();
        parent.insert_before(&script, Some(anchor)).is_ok()
    }
}

/// `window.dataLayer`, fed through `window.gtag`.
pub struct DataLayer;

impl DataLayer {
    fn window() -> Option<JsValue> {
        web_sys::window().map(JsValue::from)
    }

    fn array() -> Option<Array> {
        let window = Self::window()?;
        Reflect::get(&window, &JsValue::from_str(DATA_LAYER))
            .ok()?
            .dyn_into::<Array>()
            .ok()
    }

    fn gtag() -> Option<Function> {
        let window = Self::window()?;
        Reflect::get(&window, &JsValue::from_str(GTAG))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }
}

fn to_js(value: &Value) -> JsValue {
    serde_json::to_string(value)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok())
        .unwrap_or(JsValue::UNDEFINED)
}

fn to_js_args(command: &Command) -> Array {
    gtag_args(command)
        .into_iter()
        .map(|arg| match arg {
            GtagArg::Text(text) => JsValue::from_str(text),
            GtagArg::Date(at) => Date::new(&JsValue::from_str(at)).into(),
            GtagArg::Json(value) => to_js(value),
        })
        .collect()
}

impl CommandQueue for DataLayer {
    fn ensure_exists(&self) {
        let Some(window) = Self::window() else {
            return;
        };
        if Self::array().is_none() {
            let _ = Reflect::set(&window, &JsValue::from_str(DATA_LAYER), &Array::new());
        }
        if Self::gtag().is_none() {
            let gtag = Function::new_no_args("window.dataLayer.push(arguments);");
            let _ = Reflect::set(&window, &JsValue::from_str(GTAG), &gtag);
        }
    }

    fn push(&self, command: Command) {
        let Some(gtag) = Self::gtag().or_else(|| {
            self.ensure_exists();
            Self::gtag()
        }) else {
            tracing::warn!(command = %command.name, "gtag is unavailable, dropping command");
            return;
        };

        if let Err(err) = gtag.apply(&JsValue::NULL, &to_js_args(&command)) {
            tracing::warn!(command = %command.name, error = ?err, "gtag call failed");
        }
    }

    fn len(&self) -> usize {
        Self::array().map(|a| a.length() as usize).unwrap_or(0)
    }
}
