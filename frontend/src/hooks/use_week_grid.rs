use std::rc::Rc;

use shared::{
    ApiError, CategoryId, CellKey, GridEvent, GridMachine, RequestTracker, Role, WeekStart,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_request::use_api_client;
use crate::hooks::use_toast::{use_toast, ToastHandle};
use crate::services::date_utils;
use crate::services::logging::Logger;

const COMPONENT: &str = "availability-grid";

/// Reducer wrapper so the grid machine can live in `use_reducer`
#[derive(Clone, PartialEq)]
pub struct GridStore(pub GridMachine);

impl Reducible for GridStore {
    type Action = GridEvent;

    fn reduce(self: Rc<Self>, event: Self::Action) -> Rc<Self> {
        let mut machine = self.0.clone();
        machine.apply(event);
        Rc::new(GridStore(machine))
    }
}

pub struct UseWeekGridResult {
    pub state: Rc<GridStore>,
    pub actions: UseWeekGridActions,
}

#[derive(Clone, PartialEq)]
pub struct UseWeekGridActions {
    pub previous_week: Callback<()>,
    pub next_week: Callback<()>,
    pub this_week: Callback<()>,
    pub cell_clicked: Callback<CellKey>,
    pub choose_category: Callback<Option<CategoryId>>,
    pub request_delete: Callback<()>,
    pub cancel_delete: Callback<()>,
    pub close_modal: Callback<()>,
    pub submit: Callback<()>,
    pub set_filter: Callback<Option<CategoryId>>,
}

fn report(toast: &Option<ToastHandle>, error: &ApiError) {
    // 401s are handled globally by the redirect to login
    if error.is_unauthorized() {
        return;
    }
    if let Some(toast) = toast {
        toast.error(error.user_message());
    }
}

#[hook]
pub fn use_week_grid(role: Role, week_start: WeekStart) -> UseWeekGridResult {
    let api_client = use_api_client();
    let toast = use_toast();
    let store = use_reducer(|| GridStore(GridMachine::new(role, date_utils::today(), week_start)));
    let availability_tracker = use_mut_ref(RequestTracker::default);
    let submit_tracker = use_mut_ref(RequestTracker::default);

    {
        let store = store.clone();
        use_effect_with(role, move |role| {
            store.dispatch(GridEvent::RoleChanged(*role));
            || ()
        });
    }

    // Time slots and categories, once per mount
    {
        let store = store.clone();
        let api_client = api_client.clone();
        let toast = toast.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let slots = api_client.list_time_slots().await;
                let categories = api_client.list_categories().await;
                match (slots, categories) {
                    (Ok(slots), Ok(categories)) => {
                        store.dispatch(GridEvent::ReferenceLoaded { slots, categories });
                    }
                    (Err(error), _) | (_, Err(error)) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to load reference data: {}", error),
                        );
                        report(&toast, &error);
                        store.dispatch(GridEvent::ReferenceFailed(error));
                    }
                }
            });
            || ()
        });
    }

    // Availability for the visible week, again after every successful mutation
    {
        let store = store.clone();
        let api_client = api_client.clone();
        let toast = toast.clone();
        let tracker = availability_tracker.clone();
        let window = store.0.window();
        let revision = store.0.revision();
        use_effect_with((window, revision), move |(window, _)| {
            let window = *window;
            let token = tracker.borrow_mut().issue();
            store.dispatch(GridEvent::AvailabilityRequested { token, window });

            spawn_local(async move {
                match api_client.availability(&window).await {
                    Ok(records) => {
                        Logger::debug_with_component(
                            COMPONENT,
                            &format!("{} records for {}", records.len(), window.label()),
                        );
                        store.dispatch(GridEvent::AvailabilityLoaded {
                            token,
                            window,
                            records,
                        });
                    }
                    Err(error) => {
                        if tracker.borrow().is_current(token) {
                            report(&toast, &error);
                        }
                        store.dispatch(GridEvent::AvailabilityFailed { token, error });
                    }
                }
            });
            || ()
        });
    }

    let previous_week = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(GridEvent::Navigate(-1)))
    };

    let next_week = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(GridEvent::Navigate(1)))
    };

    let this_week = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(GridEvent::GoToWeekContaining(date_utils::today())))
    };

    let cell_clicked = {
        let store = store.clone();
        Callback::from(move |key: CellKey| {
            store.dispatch(GridEvent::CellClicked {
                key,
                now: date_utils::now(),
            })
        })
    };

    let choose_category = {
        let store = store.clone();
        Callback::from(move |category: Option<CategoryId>| {
            store.dispatch(GridEvent::CategoryChosen(category))
        })
    };

    let request_delete = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(GridEvent::DeleteRequested))
    };

    let cancel_delete = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(GridEvent::DeleteCancelled))
    };

    let close_modal = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(GridEvent::ModalClosed))
    };

    let set_filter = {
        let store = store.clone();
        Callback::from(move |filter: Option<CategoryId>| {
            store.dispatch(GridEvent::FilterChanged(filter))
        })
    };

    let submit = {
        let store = store.clone();
        let api_client = api_client.clone();
        let toast = toast.clone();
        Callback::from(move |_| {
            let mutation = match store.0.pending_submission() {
                None => return,
                Some(Err(invalid)) => {
                    store.dispatch(GridEvent::SubmitRejected(invalid));
                    return;
                }
                Some(Ok(mutation)) => mutation,
            };

            let token = submit_tracker.borrow_mut().issue();
            store.dispatch(GridEvent::SubmitStarted {
                token,
                mutation: mutation.clone(),
            });

            let store = store.clone();
            let api_client = api_client.clone();
            let toast = toast.clone();
            spawn_local(async move {
                let succeeded = match api_client.mutate(&mutation).await {
                    Ok(message) => {
                        Logger::info_with_component(COMPONENT, &message);
                        if let Some(toast) = &toast {
                            toast.success(message);
                        }
                        true
                    }
                    Err(error) => {
                        Logger::warn_with_component(
                            COMPONENT,
                            &format!("Mutation on {} failed: {}", mutation.key().date, error),
                        );
                        report(&toast, &error);
                        false
                    }
                };
                store.dispatch(GridEvent::SubmitFinished { token, succeeded });
            });
        })
    };

    UseWeekGridResult {
        state: Rc::new((*store).clone()),
        actions: UseWeekGridActions {
            previous_week,
            next_week,
            this_week,
            cell_clicked,
            choose_category,
            request_delete,
            cancel_delete,
            close_modal,
            submit,
            set_filter,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_store_reduces_through_machine() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();
        let store = Rc::new(GridStore(GridMachine::new(Role::User, today, WeekStart::Monday)));
        let start = store.0.window();
        let store = store.reduce(GridEvent::Navigate(1));
        assert_eq!(store.0.window(), start.next());
        let store = store.reduce(GridEvent::Navigate(-1));
        assert_eq!(store.0.window(), start);
    }
}
