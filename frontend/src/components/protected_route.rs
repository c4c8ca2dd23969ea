use shared::session::guard_decision;
use shared::{GuardDecision, SessionUser};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_request::use_api_client;
use crate::route::Route;
use crate::services::logging::Logger;
use crate::services::session::use_session;

#[derive(Properties, PartialEq)]
pub struct ProtectedRouteProps {
    #[prop_or_default]
    pub require_admin: bool,
    pub children: Html,
}

/// Renders children only once the server has confirmed the session.
///
/// The check runs on mount and again whenever the route changes; a failed
/// or unauthenticated check clears the session and redirects to login.
#[function_component(ProtectedRoute)]
pub fn protected_route(props: &ProtectedRouteProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let route = use_route::<Route>();
    let api_client = use_api_client();
    // None while pending, Some(None) when the check failed
    let checked = use_state(|| Option::<Option<SessionUser>>::None);

    {
        let checked = checked.clone();
        let session = session.clone();
        use_effect_with(route, move |_| {
            checked.set(None);
            spawn_local(async move {
                match api_client.check_session().await {
                    Ok(response) => {
                        let user = response.user();
                        match &user {
                            Some(user) => session.set_session(user.clone()),
                            None => session.clear_session(),
                        }
                        checked.set(Some(user));
                    }
                    Err(e) => {
                        Logger::warn_with_component("protected-route", &format!("Session check failed: {}", e));
                        session.clear_session();
                        checked.set(Some(None));
                    }
                }
            });
            || ()
        });
    }

    let decision = guard_decision(
        (*checked).as_ref().map(|user| user.as_ref()),
        props.require_admin,
    );

    {
        let navigator = navigator.clone();
        use_effect_with(decision, move |decision| {
            let target = match decision {
                GuardDecision::RedirectToLogin => Some(Route::Login),
                GuardDecision::RedirectHome => Some(Route::Availability),
                GuardDecision::Pending | GuardDecision::Allow => None,
            };
            if let (Some(target), Some(navigator)) = (target, navigator) {
                navigator.push(&target);
            }
            || ()
        });
    }

    match decision {
        GuardDecision::Allow => props.children.clone(),
        GuardDecision::Pending => html! {
            <div class="loading-placeholder">{"Checking your session..."}</div>
        },
        GuardDecision::RedirectToLogin | GuardDecision::RedirectHome => html! {},
    }
}
