//! Drives a headless `VirtualDom` until the provider's background work lands.

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use i18n::{I18nError, I18nProvider, StaticLoader, SyncFn, TranslationTree};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What components under test wrote down, shared through a root context.
pub type Log = Rc<RefCell<Vec<String>>>;

pub type Seen = Arc<Mutex<Vec<I18nError>>>;

pub fn en_loader() -> StaticLoader {
    StaticLoader::new().with(
        "en",
        TranslationTree::from_json(r#"{"hello": "world"}"#).expect("valid json"),
    )
}

pub fn recording_provider() -> (I18nProvider, Seen) {
    let seen: Seen = Arc::default();
    let sink = seen.clone();
    let provider = I18nProvider::builder("en", en_loader())
        .error_handler(SyncFn(move |error: &I18nError| {
            sink.lock().expect("handler lock").push(error.clone());
        }))
        .build();
    (provider, seen)
}

pub fn mount<P: Clone + 'static>(root: fn(P) -> Element, props: P) -> (VirtualDom, Log) {
    let log = Log::default();
    let mut dom = VirtualDom::new_with_props(root, props).with_root_context(log.clone());
    dom.rebuild_in_place();
    (dom, log)
}

pub fn record(line: impl Into<String>) {
    consume_context::<Log>().borrow_mut().push(line.into());
}

/// Run tasks and re-render until `done` holds, or give up after a few seconds.
pub async fn drive(dom: &mut VirtualDom, mut done: impl FnMut() -> bool) {
    for _ in 0..200 {
        if done() {
            return;
        }
        let _ = tokio::time::timeout(Duration::from_millis(20), dom.wait_for_work()).await;
        dom.render_immediate(&mut NoOpMutations);
    }
    assert!(done(), "virtual dom never reached the expected state");
}
