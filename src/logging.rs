/// Conditional logging module for development builds
///
/// The `log!` and `log_warn!` macros provide console logging that is compiled out
/// in production (release) builds by default.
///
/// Logging is enabled when either:
/// - Building in debug mode (`cfg(debug_assertions)`)
/// - The `console_logging` feature is explicitly enabled
///
/// On wasm32 the output goes to the browser console; native builds (tests,
/// benches) write to stderr instead.
///
/// # Examples
///
/// ```rust
/// use mrt_train_map::logging::log;
///
/// log!("Indexed {} trains", 12);
/// ```
#[macro_export]
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(all(target_arch = "wasm32", any(debug_assertions, feature = "console_logging")))]
        {
            web_sys::console::log_1(&format!($($arg),+).into());
        }
        #[cfg(all(not(target_arch = "wasm32"), any(debug_assertions, feature = "console_logging")))]
        {
            eprintln!($($arg),+);
        }
        #[cfg(not(any(debug_assertions, feature = "console_logging")))]
        {
            $(let _ = &$arg;)+
        }
    };
}

/// Conditionally log a warning in development builds
///
/// Same gating as `log!`, routed to `console.warn` in the browser.
#[macro_export]
macro_rules! log_warn {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(all(target_arch = "wasm32", any(debug_assertions, feature = "console_logging")))]
        {
            web_sys::console::warn_1(&format!($($arg),+).into());
        }
        #[cfg(all(not(target_arch = "wasm32"), any(debug_assertions, feature = "console_logging")))]
        {
            eprintln!("warning: {}", format!($($arg),+));
        }
        #[cfg(not(any(debug_assertions, feature = "console_logging")))]
        {
            $(let _ = &$arg;)+
        }
    };
}

pub use log;
pub use log_warn;
