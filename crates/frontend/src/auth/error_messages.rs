//! User-facing messages for auth failures
//!
//! The client propagates failures unchanged; turning them into copy is a
//! view concern and happens here.

use loopline_client::ClientError;

/// Message shown on the login form for a failed attempt
pub fn login_error_message(error: &ClientError) -> String {
    match error {
        ClientError::Validation(msg) | ClientError::BadRequest(msg) => msg.clone(),
        ClientError::AuthenticationFailed(_) => "Incorrect login or password.".to_string(),
        ClientError::NoResponse(_) => {
            "Can't reach Loopline. Check your connection and try again.".to_string()
        }
        _ => "Something went wrong. Please try again.".to_string(),
    }
}
