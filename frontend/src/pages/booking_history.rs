use shared::bookings::{decode_listing, BookingRow, PageRequest};
use shared::{endpoints, BookingPage};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::hooks::use_request::use_request;
use crate::services::config::AppConfig;
use crate::services::date_utils;

/// Admin view of every booking, newest first, one page at a time
#[function_component(BookingHistoryPage)]
pub fn booking_history_page() -> Html {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let history = use_request::<BookingPage>(decode_listing);
    let page = use_state(|| PageRequest::first(config.history_page_size));

    {
        let execute = history.execute.clone();
        use_effect_with(*page, move |page| {
            execute.emit(endpoints::booking_history(page.page, page.page_size));
            || ()
        });
    }

    let on_previous = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set(page.previous()))
    };
    let on_next = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set(page.next()))
    };

    let today = date_utils::today();
    let (rows, total) = match &history.response {
        Some(response) => (
            response
                .bookings
                .iter()
                .map(|record| BookingRow::from_record(record, today))
                .collect::<Vec<_>>(),
            response.total,
        ),
        None => (Vec::new(), None),
    };
    let has_next = history.response.is_some() && page.has_next(total, rows.len());

    let body = if history.response.is_none() {
        match &history.error {
            Some(error) => html! { <div class="alert alert-error">{ error.user_message() }</div> },
            None => html! { <div class="loading-placeholder">{"Loading bookings..."}</div> },
        }
    } else if rows.is_empty() {
        html! { <p class="empty-state">{"No bookings on this page."}</p> }
    } else {
        html! {
            <table class="bookings-table">
                <thead>
                    <tr>
                        <th>{"User"}</th>
                        <th>{"Category"}</th>
                        <th>{"Date"}</th>
                        <th>{"Time"}</th>
                        <th>{"Status"}</th>
                        <th>{"Cancelled at"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for rows.into_iter().map(|row| html! {
                        <tr key={row.id}>
                            <td>{ row.user }</td>
                            <td>{ row.category }</td>
                            <td>{ row.date }</td>
                            <td>{ row.time_range }</td>
                            <td>{ row.status.label() }</td>
                            <td>{ row.cancelled_at.unwrap_or_else(|| "-".to_string()) }</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        }
    };

    html! {
        <div class="bookings-page">
            <h2>{"All Bookings"}</h2>
            { body }
            <div class="pagination">
                <button
                    type="button"
                    class="btn btn-secondary"
                    disabled={!page.has_previous() || history.loading}
                    onclick={on_previous}
                >
                    {"Previous"}
                </button>
                <span class="page-indicator">
                    {match total {
                        Some(total) => format!("Page {} \u{00b7} {} bookings", page.page, total),
                        None => format!("Page {}", page.page),
                    }}
                </span>
                <button
                    type="button"
                    class="btn btn-secondary"
                    disabled={!has_next || history.loading}
                    onclick={on_next}
                >
                    {"Next"}
                </button>
            </div>
        </div>
    }
}
