use shared::Role;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_request::use_api_client;
use crate::route::Route;
use crate::services::logging::Logger;
use crate::services::session::use_session;

fn nav_items(role: Role) -> &'static [(Route, &'static str)] {
    match role {
        Role::Admin => &[
            (Route::Availability, "Availability"),
            (Route::BookingHistory, "All Bookings"),
            (Route::Categories, "Categories"),
        ],
        Role::User => &[
            (Route::Availability, "Availability"),
            (Route::MyBookings, "My Bookings"),
        ],
    }
}

#[function_component(Header)]
pub fn header() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let api_client = use_api_client();
    let auth = session.get_session();

    let on_logout = {
        let session = session.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            let api_client = api_client.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                // the session is dropped locally whatever the server says
                if let Err(e) = api_client.logout().await {
                    Logger::warn_with_component("header", &format!("Logout request failed: {}", e));
                }
                session.clear_session();
                if let Some(navigator) = navigator {
                    navigator.push(&Route::Login);
                }
            });
        })
    };

    let current = use_route::<Route>();

    html! {
        <header class="header">
            <div class="container">
                <h1 class="brand">{"Event Booking"}</h1>
                <nav class="header-nav">
                    { for nav_items(auth.role()).iter().map(|(route, label)| {
                        let classes = classes!("nav-link", (current == Some(*route)).then_some("active"));
                        html! {
                            <Link<Route> to={*route} {classes}>{ *label }</Link<Route>>
                        }
                    }) }
                </nav>
                <div class="header-right">
                    <span class="avatar">{ auth.initials() }</span>
                    <span class="user-name">{ auth.display_name().to_string() }</span>
                    <button type="button" class="btn btn-secondary" onclick={on_logout}>
                        {"Logout"}
                    </button>
                </div>
            </div>
        </header>
    }
}
