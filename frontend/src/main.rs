use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod hooks;
mod pages;
mod route;
mod services;

use components::header::Header;
use components::protected_route::ProtectedRoute;
use components::toast::ToastStack;
use hooks::use_toast::{use_toast_provider, ToastHandle};
use pages::availability::AvailabilityPage;
use pages::booking_history::BookingHistoryPage;
use pages::categories::CategoriesPage;
use pages::login::LoginPage;
use pages::my_bookings::MyBookingsPage;
use pages::not_found::NotFoundPage;
use pages::register::RegisterPage;
use route::Route;
use shared::SessionAction;
use services::api::ApiClient;
use services::config::AppConfig;
use services::logging::Logger;
use services::session::{expire_session, SessionHandle, SessionStore};

fn switch(route: Route) -> Html {
    let page = match route {
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Availability => html! { <AvailabilityPage /> },
        Route::MyBookings => html! { <MyBookingsPage /> },
        Route::BookingHistory => html! { <BookingHistoryPage /> },
        Route::Categories => html! { <CategoriesPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    };

    if route.is_public() {
        return html! { <main class="container">{ page }</main> };
    }

    html! {
        <>
            <Header />
            <main class="container">
                <ProtectedRoute require_admin={route.requires_admin()}>{ page }</ProtectedRoute>
            </main>
        </>
    }
}

/// Everything that needs the router: session, API client and toasts
#[function_component(Shell)]
fn shell() -> Html {
    let config = use_memo((), |_| AppConfig::load());
    let session = SessionHandle::new(use_reducer(SessionStore::default));
    let navigator = use_navigator();
    let toasts = use_toast_provider(config.toast_duration_ms);

    let on_unauthorized = {
        let session = session.clone();
        let toast = toasts.handle.clone();
        use_memo((), move |_| {
            expire_session(
                Callback::from(move |action: SessionAction| session.dispatch(action)),
                Callback::from(move |route: Route| {
                    toast.info("Your session has ended. Please sign in again.");
                    match &navigator {
                        Some(navigator) => navigator.push(&route),
                        None => log::error!("no router to redirect to {}", route.to_path()),
                    }
                }),
            )
        })
    };

    let api_client = {
        let base_url = config.api_base_url.clone();
        use_memo(base_url, move |base_url| {
            ApiClient::with_base_url(base_url.clone()).on_unauthorized((*on_unauthorized).clone())
        })
    };

    html! {
        <ContextProvider<AppConfig> context={(*config).clone()}>
            <ContextProvider<ApiClient> context={(*api_client).clone()}>
                <ContextProvider<SessionHandle> context={session}>
                    <ContextProvider<ToastHandle> context={toasts.handle.clone()}>
                        <div class="app">
                            <Switch<Route> render={switch} />
                            <ToastStack toasts={toasts.toasts.clone()} on_dismiss={toasts.dismiss.clone()} />
                        </div>
                    </ContextProvider<ToastHandle>>
                </ContextProvider<SessionHandle>>
            </ContextProvider<ApiClient>>
        </ContextProvider<AppConfig>>
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <Shell />
        </BrowserRouter>
    }
}

fn start() -> anyhow::Result<()> {
    let config = AppConfig::load();
    Logger::init(config.log_level)?;
    log::info!("booking frontend starting against {}", config.api_base_url);
    yew::Renderer::<App>::new().render();
    Ok(())
}

fn main() {
    if let Err(e) = start() {
        gloo::console::error!(format!("startup failed: {:#}", e));
    }
}
