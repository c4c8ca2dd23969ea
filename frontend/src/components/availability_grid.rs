use std::rc::Rc;

use chrono::NaiveDateTime;
use shared::{CellKey, CellView, GridPhase};
use yew::prelude::*;

use crate::hooks::use_week_grid::GridStore;
use crate::services::date_utils::format_day_heading;

#[derive(Properties, PartialEq)]
pub struct AvailabilityGridProps {
    pub state: Rc<GridStore>,
    pub now: NaiveDateTime,
    pub on_cell_click: Callback<CellKey>,
}

#[function_component(AvailabilityGrid)]
pub fn availability_grid(props: &AvailabilityGridProps) -> Html {
    let machine = &props.state.0;
    let today = props.now.date();

    let (Some(grid), Some(projection)) = (machine.grid(), machine.projection()) else {
        // the error banner above explains a failed fetch
        if machine.availability_error().is_some() {
            return html! {
                <div class="grid-placeholder">{"Availability for this week is unavailable."}</div>
            };
        }
        return html! {
            <div class="grid-placeholder">{"Loading availability..."}</div>
        };
    };

    if grid.slots().is_empty() {
        if machine.reference_error().is_some() {
            return html! {};
        }
        return html! {
            <div class="grid-empty">{"No time slots have been configured."}</div>
        };
    }

    if projection.slots.is_empty() || projection.dates.is_empty() {
        return html! {
            <div class="grid-empty">{"No slots in this category for the selected week."}</div>
        };
    }

    let clicks_enabled = matches!(machine.phase(), GridPhase::Ready);

    html! {
        <div class="availability-grid">
            <table class="grid-table">
                <thead>
                    <tr>
                        <th class="grid-corner">{"Time"}</th>
                        { for projection.dates.iter().map(|date| {
                            let class = classes!("grid-day", (*date == today).then_some("grid-today"));
                            html! { <th {class}>{ format_day_heading(*date) }</th> }
                        }) }
                    </tr>
                </thead>
                <tbody>
                    { for projection.slots.iter().map(|slot| html! {
                        <tr key={slot.id}>
                            <th class="grid-slot">{ slot.display_range() }</th>
                            { for projection.dates.iter().map(|date| {
                                let view = grid.cell_view(*date, slot, machine.role(), props.now);
                                render_cell(view, clicks_enabled, &props.on_cell_click)
                            }) }
                        </tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}

fn render_cell(view: CellView, clicks_enabled: bool, on_cell_click: &Callback<CellKey>) -> Html {
    let actionable = clicks_enabled && view.is_actionable();
    let class = classes!(
        "grid-cell",
        view.tone.css_class(),
        actionable.then_some("grid-cell-actionable"),
    );

    let onclick = actionable.then(|| {
        let key = view.key;
        let on_cell_click = on_cell_click.clone();
        Callback::from(move |_: MouseEvent| on_cell_click.emit(key))
    });

    html! {
        <td {class} {onclick}>
            <span class="cell-label">{ view.label }</span>
            { for view.detail.map(|detail| html! {
                <span class="cell-detail">{ detail }</span>
            }) }
        </td>
    }
}
