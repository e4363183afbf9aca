//! Click-to-start wiring against the real page.
//!
//! `start()` runs at module load: it reads the page config, installs a
//! one-shot click listener on the trigger element, and returns. The
//! activation sequence itself runs later, inside the user gesture, as a
//! single spawned future. Failures are reported once through the console —
//! `spawn_local` would otherwise swallow them.

mod audio;
mod dom;
mod loader;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use ignition::launch::{AudioState, LaunchHost, Launcher};
use ignition::{LaunchConfig, LaunchError};

pub fn start() {
    console_error_panic_hook::set_once();

    if let Err(msg) = install() {
        report_failure(&msg);
    }
}

type ClickClosure = Closure<dyn FnMut(web_sys::Event)>;

fn install() -> Result<(), String> {
    let document = dom::document()?;
    let config = dom::page_config(&document)?;

    let trigger = dom::element_by_id(&document, &config.trigger_id)
        .ok_or_else(|| format!("missing trigger element #{}", config.trigger_id))?;

    // The listener removes itself (through the host) once the gesture
    // arrives, so it lives in a shared slot instead of being leaked.
    let slot: Rc<RefCell<Option<ClickClosure>>> = Rc::new(RefCell::new(None));

    let cb = {
        let slot = slot.clone();
        let trigger = trigger.clone();
        Closure::wrap(Box::new(move |_ev: web_sys::Event| {
            let host = PageHost::new(config.clone(), trigger.clone(), slot.clone());
            wasm_bindgen_futures::spawn_local(run_activation(host));
        }) as Box<dyn FnMut(web_sys::Event)>)
    };

    let opts = web_sys::AddEventListenerOptions::new();
    opts.set_once(true);
    opts.set_passive(true);
    trigger
        .add_event_listener_with_callback_and_add_event_listener_options(
            "click",
            cb.as_ref().unchecked_ref(),
            &opts,
        )
        .map_err(|_| "trigger: add_event_listener threw".to_string())?;
    *slot.borrow_mut() = Some(cb);

    Ok(())
}

async fn run_activation(mut host: PageHost) {
    let mut launcher = Launcher::new();
    if let Err(err) = launcher.activate(&mut host).await {
        report_failure(&err.to_string());
    }
}

fn report_failure(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(&format!("ignition: {msg}")));
}

pub(crate) fn js_error_message(v: &JsValue) -> String {
    if let Some(err) = v.dyn_ref::<js_sys::Error>() {
        String::from(err.message())
    } else if let Some(s) = v.as_string() {
        s
    } else {
        format!("{v:?}")
    }
}

/// `LaunchHost` over the live page: the trigger element and its listener
/// slot, the placeholder looked up by id, a lazily created `AudioContext`,
/// and the dynamically imported application module.
struct PageHost {
    config: LaunchConfig,
    trigger: web_sys::Element,
    listener: Rc<RefCell<Option<ClickClosure>>>,
    audio: Option<web_sys::AudioContext>,
}

impl PageHost {
    fn new(
        config: LaunchConfig,
        trigger: web_sys::Element,
        listener: Rc<RefCell<Option<ClickClosure>>>,
    ) -> Self {
        Self {
            config,
            trigger,
            listener,
            audio: None,
        }
    }
}

impl LaunchHost for PageHost {
    type Module = loader::LoadedModule;

    fn detach_trigger(&mut self) -> Result<(), LaunchError> {
        // `once: true` already made the listener one-shot; removing it as
        // well matches the page contract and lets the closure drop. The
        // closure is not executing here — activation runs in a spawned
        // future, after the click callback returned.
        if let Some(cb) = self.listener.borrow_mut().take() {
            self.trigger
                .remove_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
                .map_err(|_| {
                    LaunchError::Dom("trigger: remove_event_listener threw".to_string())
                })?;
        }
        Ok(())
    }

    fn remove_placeholder(&mut self) -> Result<(), LaunchError> {
        let document = dom::document().map_err(LaunchError::Dom)?;
        let placeholder = dom::element_by_id(&document, &self.config.placeholder_id)
            .ok_or_else(|| LaunchError::MissingElement(self.config.placeholder_id.clone()))?;
        placeholder.remove();
        Ok(())
    }

    fn audio_state(&mut self) -> Result<AudioState, LaunchError> {
        if self.audio.is_none() {
            self.audio = Some(audio::create_context().map_err(LaunchError::Audio)?);
        }
        let ctx = self
            .audio
            .as_ref()
            .ok_or_else(|| LaunchError::Audio("context unavailable".to_string()))?;
        Ok(audio::state(ctx))
    }

    async fn resume_audio(&mut self) -> Result<(), LaunchError> {
        let ctx = self
            .audio
            .clone()
            .ok_or_else(|| LaunchError::Audio("context not created".to_string()))?;
        audio::resume(&ctx).await.map_err(LaunchError::Audio)
    }

    async fn load_module(&mut self) -> Result<loader::LoadedModule, LaunchError> {
        loader::load(&self.config).await
    }
}
