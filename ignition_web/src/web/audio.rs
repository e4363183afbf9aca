use ignition::launch::AudioState;

pub(super) fn create_context() -> Result<web_sys::AudioContext, String> {
    web_sys::AudioContext::new()
        .map_err(|e| format!("create: {}", super::js_error_message(&e)))
}

pub(super) fn state(ctx: &web_sys::AudioContext) -> AudioState {
    match ctx.state() {
        web_sys::AudioContextState::Running => AudioState::Running,
        web_sys::AudioContextState::Suspended => AudioState::Suspended,
        web_sys::AudioContextState::Closed => AudioState::Closed,
        // `AudioContextState` is non_exhaustive; an unknown state gets a
        // resume request, which is harmless on a running context.
        _ => AudioState::Suspended,
    }
}

/// Ask the context to resume and wait for the browser to settle the
/// request. Inside a user-gesture call stack this resolves promptly.
pub(super) async fn resume(ctx: &web_sys::AudioContext) -> Result<(), String> {
    let promise = ctx
        .resume()
        .map_err(|e| format!("resume: {}", super::js_error_message(&e)))?;
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|e| format!("resume: {}", super::js_error_message(&e)))?;
    Ok(())
}
