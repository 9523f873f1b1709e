//! Session-expiry bridge between the client and the Yew tree
//!
//! The client's event handler has to be thread-safe, while a reducer handle
//! is not. The handler installed on the auth manager forwards into this
//! thread-local callback, which the provider owns for the lifetime of the
//! app.

use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static SESSION_EXPIRED_CALLBACK: RefCell<Option<Rc<dyn Fn()>>> = RefCell::new(None);
}

/// Set the callback run when the session expires
pub fn set_session_expired_callback(callback: Rc<dyn Fn()>) {
    SESSION_EXPIRED_CALLBACK.with(|cb| {
        *cb.borrow_mut() = Some(callback);
    });
}

/// Clear the callback
pub fn clear_session_expired_callback() {
    SESSION_EXPIRED_CALLBACK.with(|cb| {
        *cb.borrow_mut() = None;
    });
}

/// Run the callback, if one is registered
pub fn notify_session_expired() {
    SESSION_EXPIRED_CALLBACK.with(|cb| {
        if let Some(callback) = cb.borrow().as_ref() {
            callback();
        }
    });
}
