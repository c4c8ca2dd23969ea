use shared::bookings::{decode_listing, BookingRow};
use shared::{endpoints, BookingId, BookingPage};
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::confirm_modal::ConfirmModal;
use crate::hooks::use_request::{use_api_client, use_request};
use crate::hooks::use_toast::use_toast;
use crate::services::date_utils;
use crate::services::logging::Logger;

#[function_component(MyBookingsPage)]
pub fn my_bookings_page() -> Html {
    let api_client = use_api_client();
    let toast = use_toast();
    let bookings = use_request::<BookingPage>(decode_listing);
    let pending_cancel = use_state(|| Option::<BookingId>::None);
    let cancelling = use_state(|| false);

    let refresh = {
        let execute = bookings.execute.clone();
        Callback::from(move |_: ()| execute.emit(endpoints::my_bookings()))
    };

    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let on_confirm_cancel = {
        let pending_cancel = pending_cancel.clone();
        let cancelling = cancelling.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: ()| {
            let Some(id) = *pending_cancel else {
                return;
            };
            cancelling.set(true);

            let api_client = api_client.clone();
            let pending_cancel = pending_cancel.clone();
            let cancelling = cancelling.clone();
            let refresh = refresh.clone();
            let toast = toast.clone();
            spawn_local(async move {
                match api_client.cancel_booking(id).await {
                    Ok(success) => {
                        if let Some(toast) = &toast {
                            toast.success(
                                success
                                    .message
                                    .unwrap_or_else(|| "Booking cancelled.".to_string()),
                            );
                        }
                        refresh.emit(());
                    }
                    Err(error) => {
                        Logger::warn_with_component(
                            "my-bookings",
                            &format!("Cancelling booking {} failed: {}", id, error),
                        );
                        if let (Some(toast), false) = (&toast, error.is_unauthorized()) {
                            toast.error(error.user_message());
                        }
                    }
                }
                cancelling.set(false);
                pending_cancel.set(None);
            });
        })
    };

    let on_dismiss_cancel = {
        let pending_cancel = pending_cancel.clone();
        Callback::from(move |_: ()| pending_cancel.set(None))
    };

    let today = date_utils::today();
    let rows: Vec<BookingRow> = bookings
        .response
        .as_ref()
        .map(|page| {
            page.bookings
                .iter()
                .map(|record| BookingRow::from_record(record, today))
                .collect()
        })
        .unwrap_or_default();

    let body = if bookings.response.is_none() {
        match &bookings.error {
            Some(error) => html! { <div class="alert alert-error">{ error.user_message() }</div> },
            None => html! { <div class="loading-placeholder">{"Loading your bookings..."}</div> },
        }
    } else if rows.is_empty() {
        html! { <p class="empty-state">{"You have no bookings yet."}</p> }
    } else {
        html! {
            <table class="bookings-table">
                <thead>
                    <tr>
                        <th>{"Category"}</th>
                        <th>{"Date"}</th>
                        <th>{"Time"}</th>
                        <th>{"Status"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for rows.into_iter().map(|row| {
                        let id = row.id;
                        let pending_cancel = pending_cancel.clone();
                        let on_cancel = Callback::from(move |_: MouseEvent| pending_cancel.set(Some(id)));
                        html! {
                            <tr key={id}>
                                <td>{ row.category }</td>
                                <td>{ row.date }</td>
                                <td>{ row.time_range }</td>
                                <td>
                                    <span class={classes!("status-badge", format!("status-{}", row.status.label().to_lowercase()))}>
                                        { row.status.label() }
                                    </span>
                                </td>
                                <td>
                                    {if row.can_cancel {
                                        html! {
                                            <button type="button" class="btn btn-link" onclick={on_cancel}>
                                                {"Cancel"}
                                            </button>
                                        }
                                    } else {
                                        html! {}
                                    }}
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        }
    };

    html! {
        <div class="bookings-page">
            <h2>{"My Bookings"}</h2>
            { body }
            {if pending_cancel.is_some() {
                html! {
                    <ConfirmModal
                        title="Cancel Booking"
                        message="Cancel this booking? The slot will become available to others."
                        confirm_label="Cancel booking"
                        busy={*cancelling}
                        on_confirm={on_confirm_cancel}
                        on_cancel={on_dismiss_cancel}
                    />
                }
            } else {
                html! {}
            }}
        </div>
    }
}
