use shared::validation::LoginForm;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_request::use_api_client;
use crate::route::Route;
use crate::services::logging::Logger;
use crate::services::session::use_session;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let api_client = use_api_client();
    let session = use_session();
    let navigator = use_navigator();
    let form = use_state(LoginForm::default);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    let on_email_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(LoginForm {
                email: input.value(),
                ..(*form).clone()
            });
        })
    };

    let on_password_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(LoginForm {
                password: input.value(),
                ..(*form).clone()
            });
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
            let session = session.clone();
            let navigator = navigator.clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();

            spawn_local(async move {
                match api_client.login(&request).await {
                    Ok(user) => {
                        Logger::info_with_component("login", &format!("Signed in as {}", user.username));
                        session.set_session(user);
                        is_submitting.set(false);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Availability);
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
                <h3 class="auth-title">{"Login"}</h3>

                {if let Some(error) = (*error_message).clone() {
                    html! { <div class="form-error">{ error }</div> }
                } else {
                    html! {}
                }}

                <div class="form-group">
                    <label for="login-email">{"Email"}</label>
                    <input
                        id="login-email"
                        type="email"
                        value={form.email.clone()}
                        oninput={on_email_input}
                        disabled={*is_submitting}
                        autofocus=true
                    />
                </div>
                <div class="form-group">
                    <label for="login-password">{"Password"}</label>
                    <input
                        id="login-password"
                        type="password"
                        value={form.password.clone()}
                        oninput={on_password_input}
                        disabled={*is_submitting}
                    />
                </div>
                <button type="submit" class="btn btn-primary btn-block" disabled={*is_submitting}>
                    {if *is_submitting { "Signing in..." } else { "Login" }}
                </button>
                <p class="auth-switch">
                    {"No account yet? "}
                    <Link<Route> to={Route::Register}>{"Register"}</Link<Route>>
                </p>
            </form>
        </div>
    }
}
