use std::any::Any;

/// Extract the message from a panic payload.
///
/// `panic!` with a literal produces a `&'static str` payload and with format arguments a
/// `String`; anything else comes from `std::panic::panic_any`.
///
/// # Example
///
/// ```rust
/// use dynamic_tests::utils::panic_message;
///
/// let payload = std::panic::catch_unwind(|| panic!("assertion {} failed", 3)).unwrap_err();
/// assert_eq!(panic_message(payload.as_ref()), "assertion 3 failed");
/// ```
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
