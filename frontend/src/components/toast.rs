use web_sys::MouseEvent;
use yew::prelude::*;

use crate::hooks::use_toast::{Toast, ToastKind};

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u32>,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="toast-stack" role="status">
            { for props.toasts.iter().map(|toast| {
                let id = toast.id;
                let on_dismiss = props.on_dismiss.reform(move |_: MouseEvent| id);
                let class = match toast.kind {
                    ToastKind::Success => "toast toast-success",
                    ToastKind::Error => "toast toast-error",
                    ToastKind::Info => "toast toast-info",
                };
                html! {
                    <div key={id} {class}>
                        <span class="toast-message">{ toast.message.clone() }</span>
                        <button type="button" class="toast-close" onclick={on_dismiss}>{"\u{00d7}"}</button>
                    </div>
                }
            }) }
        </div>
    }
}
