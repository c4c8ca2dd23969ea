use shared::endpoints;
use shared::validation::{CategoryForm, CategorySubmission};
use shared::Category;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::hooks::use_request::{envelope_data, use_api_client, use_request};
use crate::hooks::use_toast::use_toast;
use crate::services::logging::Logger;

/// Admin category list with a single create/edit form
#[function_component(CategoriesPage)]
pub fn categories_page() -> Html {
    let api_client = use_api_client();
    let toast = use_toast();
    let categories = use_request::<Vec<Category>>(envelope_data::<Vec<Category>>);
    let form = use_state(CategoryForm::default);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    let refresh = {
        let execute = categories.execute.clone();
        Callback::from(move |_: ()| execute.emit(endpoints::list_categories()))
    };

    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let on_name_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.name = input.value();
            form.set(next);
        })
    };

    let on_add_new = {
        let form = form.clone();
        let error_message = error_message.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*form).clone();
            next.reset();
            form.set(next);
            error_message.set(None);
        })
    };

    let on_submit = {
        let form = form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let refresh = refresh.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_submitting {
                return;
            }

            let submission = match form.submission() {
                Ok(submission) => submission,
                Err(invalid) => {
                    error_message.set(Some(invalid.to_string()));
                    return;
                }
            };

            is_submitting.set(true);
            error_message.set(None);

            let api_client = api_client.clone();
            let form = form.clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let refresh = refresh.clone();
            let toast = toast.clone();

            spawn_local(async move {
                let (result, fallback) = match &submission {
                    CategorySubmission::Create(request) => {
                        (api_client.create_category(request).await, "Category created.")
                    }
                    CategorySubmission::Update { id, request } => {
                        (api_client.update_category(*id, request).await, "Category updated.")
                    }
                };

                match result {
                    Ok(success) => {
                        let message = success.message.unwrap_or_else(|| fallback.to_string());
                        if let Some(toast) = &toast {
                            toast.success(message);
                        }
                        let mut next = (*form).clone();
                        next.reset();
                        form.set(next);
                        refresh.emit(());
                    }
                    Err(error) => {
                        Logger::warn_with_component(
                            "categories",
                            &format!("Saving category failed: {}", error),
                        );
                        if !error.is_unauthorized() {
                            error_message.set(Some(error.user_message()));
                        }
                    }
                }
                is_submitting.set(false);
            });
        })
    };

    let list = match (&categories.response, &categories.error) {
        (_, Some(error)) if categories.response.is_none() => html! {
            <div class="alert alert-error">{ error.user_message() }</div>
        },
        (None, _) => html! { <div class="loading-placeholder">{"Loading categories..."}</div> },
        (Some(list), _) if list.is_empty() => html! {
            <p class="empty-state">{"No categories yet."}</p>
        },
        (Some(list), _) => html! {
            <ul class="category-list">
                { for list.iter().map(|category| {
                    let form = form.clone();
                    let error_message = error_message.clone();
                    let id = category.id;
                    let name = category.name.clone();
                    let editing = form.edit_id == Some(id);
                    let on_edit = Callback::from(move |_: MouseEvent| {
                        let mut next = (*form).clone();
                        next.begin_edit(id, &name);
                        form.set(next);
                        error_message.set(None);
                    });
                    html! {
                        <li key={id} class={classes!("category-item", editing.then_some("editing"))}>
                            <span class="category-name">{ category.name.clone() }</span>
                            <button type="button" class="btn btn-link" onclick={on_edit}>{"Edit"}</button>
                        </li>
                    }
                }) }
            </ul>
        },
    };

    html! {
        <div class="categories-page">
            <h2>{"Categories"}</h2>
            <div class="category-form-card">
                <h3>{ if form.is_editing() { "Edit Category" } else { "New Category" } }</h3>
                {if let Some(error) = (*error_message).clone() {
                    html! { <div class="form-error">{ error }</div> }
                } else {
                    html! {}
                }}
                <form class="category-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="category-name">{"Name"}</label>
                        <input
                            id="category-name"
                            type="text"
                            placeholder="Category name"
                            value={form.name.clone()}
                            oninput={on_name_input}
                            disabled={*is_submitting}
                        />
                    </div>
                    <div class="form-buttons">
                        <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                            {if *is_submitting {
                                "Saving..."
                            } else if form.is_editing() {
                                "Update"
                            } else {
                                "Create"
                            }}
                        </button>
                        {if form.is_editing() {
                            html! {
                                <button type="button" class="btn btn-secondary" onclick={on_add_new}>
                                    {"Add new"}
                                </button>
                            }
                        } else {
                            html! {}
                        }}
                    </div>
                </form>
            </div>
            { list }
        </div>
    }
}
