use shared::{Category, CategoryId, Selection, TimeSlot};
use web_sys::{HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use crate::services::date_utils::format_long_date;

#[derive(Properties, PartialEq)]
pub struct CategoryModalProps {
    pub selection: Selection,
    pub slot: Option<TimeSlot>,
    pub categories: Vec<Category>,
    pub error: Option<String>,
    pub on_choose: Callback<Option<CategoryId>>,
    pub on_save: Callback<()>,
    pub on_delete: Callback<()>,
    pub on_close: Callback<()>,
}

/// Admin dialog for assigning, changing or removing a cell's category
#[function_component(CategoryModal)]
pub fn category_modal(props: &CategoryModalProps) -> Html {
    let on_change = {
        let on_choose = props.on_choose.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_choose.emit(select.value().parse::<CategoryId>().ok());
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_save = props.on_save.reform(|_: MouseEvent| ());
    let on_delete = props.on_delete.reform(|_: MouseEvent| ());
    let on_cancel = props.on_close.reform(|_: MouseEvent| ());

    let selected = props.selection.category_id;
    let title = if props.selection.has_existing {
        "Change Category"
    } else {
        "Assign Category"
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <div class="modal-content">
                    <h3 class="modal-title">{ title }</h3>
                    <p class="modal-subtitle">
                        { format_long_date(props.selection.date) }
                        { for props.slot.as_ref().map(|slot| html! {
                            <span class="modal-slot">{ format!(" \u{00b7} {}", slot.display_range()) }</span>
                        }) }
                    </p>

                    {if let Some(error) = props.error.clone() {
                        html! { <div class="modal-error">{ error }</div> }
                    } else {
                        html! {}
                    }}

                    <div class="form-group">
                        <label for="cell-category">{"Category"}</label>
                        <select id="cell-category" class="modal-select" onchange={on_change}>
                            <option value="" selected={selected.is_none()}>{"Select a category"}</option>
                            { for props.categories.iter().map(|category| html! {
                                <option
                                    key={category.id}
                                    value={category.id.to_string()}
                                    selected={selected == Some(category.id)}
                                >
                                    { category.name.clone() }
                                </option>
                            }) }
                        </select>
                    </div>

                    <div class="modal-buttons">
                        <button type="button" class="btn btn-primary" onclick={on_save}>
                            {"Save"}
                        </button>
                        {if props.selection.has_existing {
                            html! {
                                <button type="button" class="btn btn-danger" onclick={on_delete}>
                                    {"Delete"}
                                </button>
                            }
                        } else {
                            html! {}
                        }}
                        <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                            {"Cancel"}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
