use yew::prelude::*;
use yew_router::prelude::*;

use crate::route::Route;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="not-found">
            <h2>{"Page not found"}</h2>
            <Link<Route> to={Route::Availability}>{"Back to availability"}</Link<Route>>
        </div>
    }
}
