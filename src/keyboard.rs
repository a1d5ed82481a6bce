//! Keyboard Glue
//!
//! One document-level keydown listener feeds the shared `KeyBindings`;
//! components bind keys for as long as they are mounted.

use leptos::prelude::*;
use popcorn_core::{FocusPolicy, KeyBindings, KeyPress};
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::context::use_app_context;

type KeydownListener = (web_sys::Document, Closure<dyn FnMut(web_sys::KeyboardEvent)>);

/// Focus is inside a text field
fn is_typing(document: &web_sys::Document) -> bool {
    document
        .active_element()
        .map(|el| {
            el.dyn_ref::<web_sys::HtmlInputElement>().is_some()
                || el.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some()
        })
        .unwrap_or(false)
}

/// Install the document listener; it is removed when the calling owner is cleaned up
pub fn install_key_listener(keys: KeyBindings) {
    let Some(document) = web_sys::window().and_then(|win| win.document()) else {
        warn!("No document, keyboard shortcuts disabled");
        return;
    };

    let listener_document = document.clone();
    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        let press = KeyPress::new(ev.code(), is_typing(&listener_document));
        keys.dispatch(&press);
    });

    if document
        .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())
        .is_err()
    {
        warn!("Failed to register keydown listener");
        return;
    }

    let listener = StoredValue::new_local(Some::<KeydownListener>((document, on_keydown)));
    on_cleanup(move || {
        listener.update_value(|slot| {
            if let Some((document, on_keydown)) = slot.take() {
                let _ = document
                    .remove_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
            }
        });
    });
}

/// Bind `code` while the calling component is mounted
pub fn use_key(code: &str, policy: FocusPolicy, action: impl Fn() + 'static) {
    let binding = use_app_context().keys().bind(code, policy, action);
    let binding = StoredValue::new_local(Some(binding));
    on_cleanup(move || {
        binding.update_value(|slot| {
            slot.take();
        });
    });
}
