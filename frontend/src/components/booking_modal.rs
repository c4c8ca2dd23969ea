use shared::{Selection, TimeSlot};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::date_utils::format_long_date;

#[derive(Properties, PartialEq)]
pub struct BookingModalProps {
    pub selection: Selection,
    pub slot: Option<TimeSlot>,
    pub error: Option<String>,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(BookingModal)]
pub fn booking_modal(props: &BookingModalProps) -> Html {
    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };
    let on_modal_click = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_confirm = props.on_confirm.reform(|_: MouseEvent| ());
    let on_cancel = props.on_close.reform(|_: MouseEvent| ());

    let category = props
        .selection
        .category
        .as_ref()
        .map(|category| category.name.clone())
        .unwrap_or_default();

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <div class="modal-content">
                    <h3 class="modal-title">{"Confirm Booking"}</h3>
                    {if let Some(error) = props.error.clone() {
                        html! { <div class="modal-error">{ error }</div> }
                    } else {
                        html! {}
                    }}
                    <dl class="booking-summary">
                        <dt>{"Category"}</dt>
                        <dd>{ category }</dd>
                        <dt>{"Date"}</dt>
                        <dd>{ format_long_date(props.selection.date) }</dd>
                        <dt>{"Time"}</dt>
                        <dd>{ props.slot.as_ref().map(TimeSlot::display_range).unwrap_or_default() }</dd>
                    </dl>
                    <div class="modal-buttons">
                        <button type="button" class="btn btn-primary" onclick={on_confirm}>
                            {"Book"}
                        </button>
                        <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                            {"Cancel"}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
