//! Logging macros.
//!
//! Forward to `defmt` when the `defmt` feature is enabled. Host unit tests
//! print to stdout and keep a per-thread copy for assertions; every other
//! build compiles the call away. Arguments must be primitives or `&str` so
//! the same call sites work with both backends.

macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "defmt"), feature = "std", test))]
        $crate::log::capture::record("INFO", ::std::format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(all(feature = "std", test))))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "defmt"), feature = "std", test))]
        $crate::log::capture::record("WARN", ::std::format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(all(feature = "std", test))))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "defmt"), feature = "std", test))]
        $crate::log::capture::record("ERROR", ::std::format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(all(feature = "std", test))))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "defmt"), feature = "std", test))]
        $crate::log::capture::record("DEBUG", ::std::format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(all(feature = "std", test))))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Test-only log capture, one buffer per test thread.
#[cfg(all(not(feature = "defmt"), feature = "std", test))]
pub(crate) mod capture {
    use std::cell::RefCell;
    use std::string::String;
    use std::vec::Vec;

    std::thread_local! {
        static LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    pub(crate) fn record(level: &str, message: String) {
        let line = std::format!("[{}] {}", level, message);
        if level == "ERROR" {
            std::eprintln!("{}", line);
        } else {
            std::println!("{}", line);
        }
        LINES.with(|lines| lines.borrow_mut().push(line));
    }

    /// Drain everything logged on this thread so far.
    pub(crate) fn take() -> Vec<String> {
        LINES.with(|lines| lines.borrow_mut().drain(..).collect())
    }
}
