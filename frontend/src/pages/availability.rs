use shared::{CategoryId, GridPhase, ModalKind, Role, TimeSlotId};
use web_sys::{HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use crate::components::availability_grid::AvailabilityGrid;
use crate::components::booking_modal::BookingModal;
use crate::components::category_modal::CategoryModal;
use crate::components::confirm_modal::ConfirmModal;
use crate::hooks::use_week_grid::{use_week_grid, UseWeekGridResult};
use crate::services::config::AppConfig;
use crate::services::date_utils;
use crate::services::session::use_session;

#[function_component(AvailabilityPage)]
pub fn availability_page() -> Html {
    let session = use_session();
    let config = use_context::<AppConfig>().unwrap_or_default();
    let role = session.get_session().role();
    let UseWeekGridResult { state, actions } = use_week_grid(role, config.week_start);

    let machine = &state.0;
    let now = date_utils::now();
    let window = machine.window();

    let on_filter_change = {
        let set_filter = actions.set_filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            set_filter.emit(select.value().parse::<CategoryId>().ok());
        })
    };

    let slot_for = |time_slot_id: TimeSlotId| {
        machine
            .slots()
            .iter()
            .find(|slot| slot.id == time_slot_id)
            .cloned()
    };
    let modal_error = machine.modal_error().map(|error| error.to_string());

    let modal = match machine.phase() {
        GridPhase::Selecting {
            selection,
            modal: ModalKind::AssignCategory,
        } => html! {
            <CategoryModal
                selection={selection.clone()}
                slot={slot_for(selection.time_slot_id)}
                categories={machine.categories().to_vec()}
                error={modal_error}
                on_choose={actions.choose_category.clone()}
                on_save={actions.submit.clone()}
                on_delete={actions.request_delete.clone()}
                on_close={actions.close_modal.clone()}
            />
        },
        GridPhase::Selecting {
            selection,
            modal: ModalKind::ConfirmBooking,
        } => html! {
            <BookingModal
                selection={selection.clone()}
                slot={slot_for(selection.time_slot_id)}
                error={modal_error}
                on_confirm={actions.submit.clone()}
                on_close={actions.close_modal.clone()}
            />
        },
        GridPhase::ConfirmingDelete { selection } => {
            let message = format!(
                "Remove the category from {} at {}? This cannot be undone.",
                date_utils::format_long_date(selection.date),
                slot_for(selection.time_slot_id)
                    .map(|slot| slot.display_range())
                    .unwrap_or_default()
            );
            html! {
                <ConfirmModal
                    title="Delete Assignment"
                    message={message}
                    confirm_label="Delete"
                    on_confirm={actions.submit.clone()}
                    on_cancel={actions.cancel_delete.clone()}
                />
            }
        }
        GridPhase::Loading | GridPhase::Ready | GridPhase::Submitting { .. } => html! {},
    };

    let status = match machine.phase() {
        GridPhase::Loading => Some("Loading..."),
        GridPhase::Submitting { .. } => Some("Saving..."),
        _ => None,
    };

    html! {
        <div class="availability-page">
            <div class="grid-toolbar">
                <div class="week-nav">
                    <button type="button" class="btn btn-secondary"
                        onclick={actions.previous_week.reform(|_: MouseEvent| ())}>
                        {"\u{2039} Previous"}
                    </button>
                    <span class="week-label">{ window.label() }</span>
                    <button type="button" class="btn btn-secondary"
                        onclick={actions.next_week.reform(|_: MouseEvent| ())}>
                        {"Next \u{203a}"}
                    </button>
                    <button type="button" class="btn btn-link"
                        disabled={window.contains(now.date())}
                        onclick={actions.this_week.reform(|_: MouseEvent| ())}>
                        {"This week"}
                    </button>
                </div>
                <div class="grid-filter">
                    <label for="category-filter">{"Category"}</label>
                    <select id="category-filter" onchange={on_filter_change}>
                        <option value="" selected={machine.filter().is_none()}>{"All categories"}</option>
                        { for machine.categories().iter().map(|category| html! {
                            <option
                                key={category.id}
                                value={category.id.to_string()}
                                selected={machine.filter() == Some(category.id)}
                            >
                                { category.name.clone() }
                            </option>
                        }) }
                    </select>
                </div>
                { for status.map(|status| html! { <span class="grid-status">{ status }</span> }) }
            </div>

            {if let Some(error) = machine.load_error() {
                html! { <div class="alert alert-error">{ error.user_message() }</div> }
            } else {
                html! {}
            }}

            {if role == Role::User {
                html! { <p class="grid-hint">{"Select an available slot to book it."}</p> }
            } else {
                html! { <p class="grid-hint">{"Select a slot to assign, change or remove its category."}</p> }
            }}

            <AvailabilityGrid
                state={state.clone()}
                now={now}
                on_cell_click={actions.cell_clicked.clone()}
            />

            { modal }
        </div>
    }
}
