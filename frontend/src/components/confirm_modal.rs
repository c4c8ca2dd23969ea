use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or(AttrValue::Static("Confirm"))]
    pub confirm_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Second-step confirmation for destructive actions
#[function_component(ConfirmModal)]
pub fn confirm_modal(props: &ConfirmModalProps) -> Html {
    let on_backdrop_click = {
        let on_cancel = props.on_cancel.clone();
        let busy = props.busy;
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if !busy {
                on_cancel.emit(());
            }
        })
    };
    let on_modal_click = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_confirm = props.on_confirm.reform(|_: MouseEvent| ());
    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal modal-confirm" onclick={on_modal_click}>
                <div class="modal-content">
                    <h3 class="modal-title">{ props.title.clone() }</h3>
                    <p>{ props.message.clone() }</p>
                    <div class="modal-buttons">
                        <button
                            type="button"
                            class="btn btn-danger"
                            onclick={on_confirm}
                            disabled={props.busy}
                        >
                            { if props.busy { AttrValue::Static("Working...") } else { props.confirm_label.clone() } }
                        </button>
                        <button
                            type="button"
                            class="btn btn-secondary"
                            onclick={on_cancel}
                            disabled={props.busy}
                        >
                            {"Cancel"}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
