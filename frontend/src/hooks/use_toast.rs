use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastList {
    pub items: Vec<Toast>,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u32),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut items = self.items.clone();
        match action {
            ToastAction::Push(toast) => items.push(toast),
            ToastAction::Dismiss(id) => items.retain(|toast| toast.id != id),
        }
        Rc::new(ToastList { items })
    }
}

/// Fire-and-forget toast notifications, shared through context
#[derive(Clone, PartialEq)]
pub struct ToastHandle {
    show: Callback<(ToastKind, String)>,
}

impl ToastHandle {
    pub fn success(&self, message: impl Into<String>) {
        self.show.emit((ToastKind::Success, message.into()));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show.emit((ToastKind::Error, message.into()));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show.emit((ToastKind::Info, message.into()));
    }
}

pub struct UseToastProviderResult {
    pub toasts: Vec<Toast>,
    pub handle: ToastHandle,
    pub dismiss: Callback<u32>,
}

/// Owns the toast list; each toast removes itself after `duration_ms`
#[hook]
pub fn use_toast_provider(duration_ms: u32) -> UseToastProviderResult {
    let list = use_reducer(ToastList::default);
    let next_id = use_mut_ref(|| 1u32);

    let show = {
        let list = list.clone();
        use_callback(duration_ms, move |(kind, message): (ToastKind, String), duration_ms| {
            let id = {
                let mut next_id = next_id.borrow_mut();
                let id = *next_id;
                *next_id = id.wrapping_add(1);
                id
            };
            list.dispatch(ToastAction::Push(Toast { id, kind, message }));

            let list = list.clone();
            let duration_ms = *duration_ms;
            spawn_local(async move {
                TimeoutFuture::new(duration_ms).await;
                list.dispatch(ToastAction::Dismiss(id));
            });
        })
    };

    let dismiss = {
        let list = list.clone();
        use_callback((), move |id: u32, _| {
            list.dispatch(ToastAction::Dismiss(id));
        })
    };

    UseToastProviderResult {
        toasts: list.items.clone(),
        handle: ToastHandle { show },
        dismiss,
    }
}

#[hook]
pub fn use_toast() -> Option<ToastHandle> {
    use_context::<ToastHandle>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let list = Rc::new(ToastList::default());
        let list = list.reduce(ToastAction::Push(Toast {
            id: 1,
            kind: ToastKind::Success,
            message: "Slot booked.".to_string(),
        }));
        let list = list.reduce(ToastAction::Push(Toast {
            id: 2,
            kind: ToastKind::Error,
            message: "Something went wrong. Please try again.".to_string(),
        }));
        assert_eq!(list.items.len(), 2);

        let list = list.reduce(ToastAction::Dismiss(1));
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].kind, ToastKind::Error);
    }

    #[test]
    fn test_handle_routes_kind_with_message() {
        let shown = Rc::new(std::cell::RefCell::new(Vec::new()));
        let handle = {
            let shown = shown.clone();
            ToastHandle {
                show: Callback::from(move |toast: (ToastKind, String)| shown.borrow_mut().push(toast)),
            }
        };
        handle.info("Your session has ended. Please sign in again.");
        handle.error("Something went wrong. Please try again.");

        let shown = shown.borrow();
        assert_eq!(shown[0].0, ToastKind::Info);
        assert_eq!(shown[1].0, ToastKind::Error);
        assert_eq!(shown[0].1, "Your session has ended. Please sign in again.");
    }
}
