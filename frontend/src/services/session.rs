use std::rc::Rc;

use shared::{AuthState, SessionAction, SessionUser};
use yew::prelude::*;

use crate::route::Route;

/// Reducer state behind the session context
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionStore {
    pub auth: AuthState,
}

impl Reducible for SessionStore {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(SessionStore {
            auth: self.auth.apply(action),
        })
    }
}

/// Injected session context: `get_session` / `set_session` / `clear_session`
#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    store: UseReducerHandle<SessionStore>,
}

impl SessionHandle {
    pub fn new(store: UseReducerHandle<SessionStore>) -> Self {
        Self { store }
    }

    pub fn get_session(&self) -> AuthState {
        self.store.auth.clone()
    }

    pub fn set_session(&self, user: SessionUser) {
        self.dispatch(SessionAction::Set(user));
    }

    pub fn clear_session(&self) {
        self.dispatch(SessionAction::Clear);
    }

    pub fn dispatch(&self, action: SessionAction) {
        self.store.dispatch(action);
    }
}

/// Handler for a 401 from any endpoint: drop the session, then go to login
pub fn expire_session(session: Callback<SessionAction>, redirect: Callback<Route>) -> Callback<()> {
    Callback::from(move |_| {
        log::info!("session expired, redirecting to login");
        session.emit(SessionAction::Clear);
        redirect.emit(Route::Login);
    })
}

#[hook]
pub fn use_session() -> SessionHandle {
    let detached = use_reducer(SessionStore::default);
    match use_context::<SessionHandle>() {
        Some(handle) => handle,
        None => {
            log::error!("use_session called outside the session provider");
            SessionHandle::new(detached)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn signed_in() -> Rc<SessionStore> {
        Rc::new(SessionStore::default()).reduce(SessionAction::Set(SessionUser {
            username: "ana".to_string(),
            name: "Ana Lima".to_string(),
            is_admin: true,
        }))
    }

    #[test]
    fn test_expired_session_is_cleared_before_redirect() {
        let store = Rc::new(RefCell::new(signed_in()));
        let events = Rc::new(RefCell::new(Vec::new()));

        let session = {
            let store = store.clone();
            let events = events.clone();
            Callback::from(move |action: SessionAction| {
                events.borrow_mut().push(format!("{:?}", action));
                let next = store.borrow().clone().reduce(action);
                *store.borrow_mut() = next;
            })
        };
        let redirect = {
            let events = events.clone();
            Callback::from(move |route: Route| events.borrow_mut().push(format!("{:?}", route)))
        };

        assert!(store.borrow().auth.is_authenticated);
        expire_session(session, redirect).emit(());

        assert!(!store.borrow().auth.is_authenticated);
        assert_eq!(store.borrow().auth, AuthState::default());
        assert_eq!(*events.borrow(), vec!["Clear".to_string(), "Login".to_string()]);
    }
}
