//! Logging macros over `Code` types; context values accept any `Display`

/// Collect `"key" => value` pairs into owned context strings
#[doc(hidden)]
#[macro_export]
macro_rules! __log_context {
    ($($key:expr => $value:expr),*) => {{
        let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),*];
        context
    }};
}

/// Log an error with a registered code
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, span = $span:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_error_with_context(
            $code,
            $message,
            Some($span),
            $crate::__log_context!($($key => $value),*),
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_error_with_context(
            $code,
            $message,
            None,
            $crate::__log_context!($($key => $value),*),
        )
    };
}

/// Log a success event with a registered code
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_success_with_context(
            $code,
            $message,
            $crate::__log_context!($($key => $value),*),
        )
    };
}

/// Log an informational message
#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_info_with_context(
            $message,
            $crate::__log_context!($($key => $value),*),
        )
    };
}

/// Log a warning, optionally with a registered code and span
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr, span = $span:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_warning_with_context(
            Some($code),
            $message,
            Some($span),
            $crate::__log_context!($($key => $value),*),
        )
    };

    (code = $code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_warning_with_context(
            Some($code),
            $message,
            None,
            $crate::__log_context!($($key => $value),*),
        )
    };

    ($message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_warning_with_context(
            None,
            $message,
            None,
            $crate::__log_context!($($key => $value),*),
        )
    };
}

/// Log a debug message; context is only formatted when debug logging is enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::logging::log_debug_with_context(
                $message,
                $crate::__log_context!($($key => $value),*),
            )
        }
    };
}

/// Log a success event with a `duration_ms` context entry
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr $(, $key:expr => $value:expr)*) => {
        $crate::log_success!($code, $message,
            "duration_ms" => format!("{:.3}", $duration.as_secs_f64() * 1000.0)
            $(, $key => $value)*
        )
    };
}
