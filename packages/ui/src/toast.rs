use dioxus::prelude::*;
use i18n::{ErrorHandler, I18nError, SyncFn};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Receiving end of [`error_feed`]; shown by [`ErrorToasts`].
///
/// Errors queue up until read, so a burst of reports is never collapsed.
#[derive(Clone)]
pub struct ErrorFeed(Arc<Mutex<mpsc::UnboundedReceiver<I18nError>>>);

impl ErrorFeed {
    /// Next error handed to the provider's handler. `None` once the handler
    /// has been dropped and the queue is drained.
    pub async fn next(&self) -> Option<I18nError> {
        self.0.lock().await.recv().await
    }
}

impl PartialEq for ErrorFeed {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// An error handler for the provider paired with a feed the UI can display.
pub fn error_feed() -> (impl ErrorHandler, ErrorFeed) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handler = SyncFn(move |error: &I18nError| {
        // The feed is gone once the toast list unmounts; nothing left to show.
        let _ = tx.send(error.clone());
    });
    (handler, ErrorFeed(Arc::new(Mutex::new(rx))))
}

#[derive(Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub error: I18nError,
}

/// Dismissable list of i18n errors, newest last.
#[derive(Clone, Copy, PartialEq)]
struct ToastList {
    items: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl ToastList {
    fn push(mut self, error: I18nError) {
        let id = (self.next_id)();
        self.next_id.set(id + 1);
        self.items.with_mut(|items| items.push(Toast { id, error }));
    }

    fn dismiss(mut self, id: u64) {
        self.items.with_mut(|items| items.retain(|toast| toast.id != id));
    }

    fn clear(mut self) {
        self.items.with_mut(Vec::clear);
    }
}

/// Shows every error the provider handed to its handler until dismissed.
#[component]
pub fn ErrorToasts(feed: ErrorFeed) -> Element {
    let list = ToastList {
        items: use_signal(Vec::new),
        next_id: use_signal(|| 1_u64),
    };

    use_future(move || {
        let feed = feed.clone();
        async move {
            while let Some(error) = feed.next().await {
                list.push(error);
            }
        }
    });

    let rows: Vec<(u64, String, String)> = (list.items)()
        .into_iter()
        .map(|toast| {
            (
                toast.id,
                toast.error.kind().to_string(),
                toast.error.message().to_string(),
            )
        })
        .collect();
    if rows.is_empty() {
        return rsx! {};
    }
    let count = rows.len();

    rsx! {
        section { class: "i18n_errors", role: "alert",
            header { class: "i18n_errors_header",
                "{count} translation problem(s)"
                button { class: "i18n_errors_clear", onclick: move |_| list.clear(), "Clear all" }
            }
            ul {
                for (id, kind, message) in rows {
                    li { key: "{id}", class: "i18n_error",
                        strong { "{kind}" }
                        " {message}"
                        button {
                            class: "i18n_error_dismiss",
                            "aria-label": "Dismiss",
                            onclick: move |_| list.dismiss(id),
                            "×"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn feed_keeps_every_error_in_order() {
        let (handler, feed) = error_feed();

        handler.handle(I18nError::provider("first")).await;
        handler.handle(I18nError::lookup("second")).await;
        handler.handle(I18nError::lookup("second")).await;
        drop(handler);

        let mut seen = Vec::new();
        while let Some(error) = feed.next().await {
            seen.push(error);
        }
        assert_eq!(
            seen,
            vec![
                I18nError::provider("first"),
                I18nError::lookup("second"),
                I18nError::lookup("second"),
            ]
        );
    }

    #[tokio::test]
    async fn clones_of_a_feed_share_one_queue() {
        let (handler, feed) = error_feed();
        let other = feed.clone();
        assert!(feed == other);

        handler.handle(I18nError::base("once")).await;
        assert_eq!(other.next().await, Some(I18nError::base("once")));
        drop(handler);
        assert_eq!(feed.next().await, None);
    }
}
