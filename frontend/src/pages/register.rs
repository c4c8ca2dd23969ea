use shared::validation::{RegisterForm, MIN_PASSWORD_LENGTH};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_request::use_api_client;
use crate::hooks::use_toast::use_toast;
use crate::route::Route;

#[derive(Clone, Copy)]
enum Field {
    Name,
    Email,
    Password,
    Confirm,
}

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let api_client = use_api_client();
    let navigator = use_navigator();
    let toast = use_toast();
    let form = use_state(RegisterForm::default);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    let on_input = |field: Field| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            let value = input.value();
            match field {
                Field::Name => next.name = value,
                Field::Email => next.email = value,
                Field::Password => next.password = value,
                Field::Confirm => next.confirm_password = value,
            }
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let navigator = navigator.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let request = match form.validate() {
                Ok(request) => request,
                Err(invalid) => {
                    error_message.set(Some(invalid.to_string()));
                    return;
                }
            };

            is_submitting.set(true);
            error_message.set(None);

            let api_client = api_client.clone();
            let navigator = navigator.clone();
            let toast = toast.clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();

            spawn_local(async move {
                match api_client.register(&request).await {
                    Ok(success) => {
                        is_submitting.set(false);
                        if let Some(toast) = &toast {
                            toast.success(success.message.unwrap_or_else(|| {
                                "Account created. Please sign in.".to_string()
                            }));
                        }
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Login);
                        }
                    }
                    Err(error) => {
                        is_submitting.set(false);
                        error_message.set(Some(error.user_message()));
                    }
                }
            });
        })
    };

    html! {
        <div class="auth-page">
            <form class="auth-form" onsubmit={on_submit}>
                <h3 class="auth-title">{"Register"}</h3>

                {if let Some(error) = (*error_message).clone() {
                    html! { <div class="form-error">{ error }</div> }
                } else {
                    html! {}
                }}

                <div class="form-group">
                    <label for="register-name">{"Name"}</label>
                    <input id="register-name" type="text" value={form.name.clone()}
                        oninput={on_input(Field::Name)} disabled={*is_submitting} />
                </div>
                <div class="form-group">
                    <label for="register-email">{"Email"}</label>
                    <input id="register-email" type="email" value={form.email.clone()}
                        oninput={on_input(Field::Email)} disabled={*is_submitting} />
                </div>
                <div class="form-group">
                    <label for="register-password">{"Password"}</label>
                    <input id="register-password" type="password" value={form.password.clone()}
                        placeholder={format!("At least {} characters", MIN_PASSWORD_LENGTH)}
                        oninput={on_input(Field::Password)} disabled={*is_submitting} />
                </div>
                <div class="form-group">
                    <label for="register-confirm">{"Confirm password"}</label>
                    <input id="register-confirm" type="password" value={form.confirm_password.clone()}
                        oninput={on_input(Field::Confirm)} disabled={*is_submitting} />
                </div>
                <button type="submit" class="btn btn-primary btn-block" disabled={*is_submitting}>
                    {if *is_submitting { "Creating account..." } else { "Register" }}
                </button>
                <p class="auth-switch">
                    {"Already registered? "}
                    <Link<Route> to={Route::Login}>{"Login"}</Link<Route>>
                </p>
            </form>
        </div>
    }
}
