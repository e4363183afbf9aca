//! Dynamic loading of the application module.
//!
//! The module is a separate wasm-bindgen build: a JS glue file whose
//! `default` export initialises the wasm binary and whose named exports
//! are the callable surface. Loading means dynamic `import()`, awaiting
//! the init promise, then resolving the entry export.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use ignition::launch::AppModule;
use ignition::{LaunchConfig, LaunchError};

pub(super) struct LoadedModule {
    entry: js_sys::Function,
    entry_name: String,
    started: bool,
}

impl AppModule for LoadedModule {
    fn start(&mut self) -> Result<(), LaunchError> {
        if self.started {
            return Err(LaunchError::Entry(format!(
                "`{}` already invoked",
                self.entry_name
            )));
        }
        self.started = true;
        self.entry.call0(&JsValue::UNDEFINED).map(|_| ()).map_err(|e| {
            LaunchError::Entry(format!(
                "`{}` threw: {}",
                self.entry_name,
                super::js_error_message(&e)
            ))
        })
    }
}

pub(super) async fn load(config: &LaunchConfig) -> Result<LoadedModule, LaunchError> {
    let namespace = import_namespace(&config.module_url)
        .await
        .map_err(LaunchError::ModuleLoad)?;
    init_module(&namespace)
        .await
        .map_err(LaunchError::ModuleLoad)?;
    resolve_entry(&namespace, config)
}

async fn import_namespace(url: &str) -> Result<js_sys::Object, String> {
    // js-sys has no binding for dynamic import; go through a one-line shim.
    let import_fn = js_sys::Function::new_with_args("specifier", "return import(specifier);");
    let promise: js_sys::Promise = import_fn
        .call1(&JsValue::UNDEFINED, &JsValue::from_str(url))
        .map_err(|e| format!("import: {}", super::js_error_message(&e)))?
        .dyn_into()
        .map_err(|_| "import: expected a promise".to_string())?;

    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|e| format!("import `{url}`: {}", super::js_error_message(&e)))?
        .dyn_into::<js_sys::Object>()
        .map_err(|_| "import: expected a module namespace".to_string())
}

async fn init_module(namespace: &js_sys::Object) -> Result<(), String> {
    let init = js_sys::Reflect::get(namespace, &JsValue::from_str("default"))
        .map_err(|_| "init: namespace lookup threw".to_string())?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| "init: module has no default init export".to_string())?;

    let ret = init
        .call0(&JsValue::UNDEFINED)
        .map_err(|e| format!("init: {}", super::js_error_message(&e)))?;
    let promise: js_sys::Promise = ret
        .dyn_into()
        .map_err(|_| "init: expected a promise".to_string())?;

    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|e| format!("init: {}", super::js_error_message(&e)))?;
    Ok(())
}

fn resolve_entry(
    namespace: &js_sys::Object,
    config: &LaunchConfig,
) -> Result<LoadedModule, LaunchError> {
    for (i, name) in config.entry_candidates().enumerate() {
        let value = js_sys::Reflect::get(namespace, &JsValue::from_str(name))
            .unwrap_or(JsValue::UNDEFINED);
        let Ok(entry) = value.dyn_into::<js_sys::Function>() else {
            continue;
        };

        if i > 0 {
            // The module exports its entry under a legacy name. Flag the
            // mismatch instead of resolving it silently.
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "ignition: entry `{}` not exported, falling back to `{name}`",
                config.entry
            )));
        }

        return Ok(LoadedModule {
            entry,
            entry_name: name.to_string(),
            started: false,
        });
    }

    let wanted: Vec<&str> = config.entry_candidates().collect();
    Err(LaunchError::Entry(format!(
        "no entry export among {wanted:?}"
    )))
}
