use dioxus::prelude::*;

use page_loader::loader::{PageContext, ReadinessHandle, ReadyState};

/// Streams `document.readyState` until the document is complete
const READY_STATE_JS: &str = r#"
    const send = () => dioxus.send(document.readyState);
    document.addEventListener("readystatechange", send);
    send();
"#;

async fn eval_string(js: &str) -> String {
    match document::eval(js).join::<String>().await {
        Ok(value) => value,
        Err(e) => {
            log::warn!("could not evaluate {js:?}: {e:?}");
            String::new()
        }
    }
}

/// Referrer and origin of the webview document
pub(super) async fn read_page_context() -> PageContext {
    let referrer = eval_string("return document.referrer;").await;
    let origin = eval_string("return window.location.origin;").await;
    log::debug!("read_page_context - referrer={referrer:?} origin={origin:?}");
    PageContext::new(referrer, origin)
}

/// Feeds the readiness channel from the webview. Dropping the handle on exit tells
/// the controller no load event will come from here anymore.
pub(super) async fn track_ready_state(handle: ReadinessHandle) {
    log::info!("ready_state_bridge - start");
    let mut eval = document::eval(READY_STATE_JS);
    while handle.is_observed() && handle.current() != ReadyState::Complete {
        match eval.recv::<String>().await {
            Ok(state) => match state.parse() {
                Ok(state) => handle.set(state),
                Err(e) => log::warn!("ready_state_bridge - {e}"),
            },
            Err(e) => {
                log::warn!("ready_state_bridge - webview channel closed: {e:?}");
                break;
            }
        }
    }
    log::info!("ready_state_bridge - finished");
}
