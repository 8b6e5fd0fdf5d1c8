//! Macros for capturing call-site data into log events.
//!
//! # Examples
//!
//! ```
//! use logstash_encoder::core::LogLevel;
//! use logstash_encoder::log_event;
//!
//! let user_id = 42;
//! let event = log_event!(LogLevel::Info, "app.auth", "user {} logged in", user_id);
//!
//! assert_eq!(event.message, "user 42 logged in");
//! assert_eq!(event.caller_data.len(), 1);
//! ```

/// Capture the current call site as a [`CallerFrame`](crate::core::CallerFrame).
///
/// The class name is the module path and the method name is the enclosing
/// function; closures contribute nothing to the method name.
///
/// # Examples
///
/// ```
/// use logstash_encoder::caller_frame;
///
/// fn handle_request() -> logstash_encoder::core::CallerFrame {
///     caller_frame!()
/// }
///
/// let frame = handle_request();
/// assert_eq!(frame.method_name, "handle_request");
/// assert!(frame.line_number > 0);
/// ```
#[macro_export]
macro_rules! caller_frame {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let path = __type_name_of(__here);
        let path = path.strip_suffix("::__here").unwrap_or(path);
        let path = path.trim_end_matches("::{{closure}}");
        let method = path.rsplit("::").next().unwrap_or(path);
        $crate::core::CallerFrame::new(
            ::std::module_path!(),
            method,
            ::std::file!(),
            ::std::line!() as i32,
        )
    }};
}

/// Build a [`LogEvent`](crate::core::LogEvent) carrying the call-site caller frame.
///
/// # Examples
///
/// ```
/// use logstash_encoder::core::LogLevel;
/// use logstash_encoder::log_event;
///
/// let event = log_event!(LogLevel::Error, "app.db", "query failed after {} retries", 3);
/// assert_eq!(event.logger_name, "app.db");
/// ```
#[macro_export]
macro_rules! log_event {
    ($level:expr, $logger:expr, $($arg:tt)+) => {
        $crate::core::LogEvent::new($level, ::std::format!($($arg)+))
            .with_logger_name($logger)
            .with_caller_data(::std::vec![$crate::caller_frame!()])
    };
}

#[cfg(test)]
mod tests {
    use crate::core::LogLevel;

    fn issue_statement() -> crate::core::CallerFrame {
        caller_frame!()
    }

    #[test]
    fn test_caller_frame_macro() {
        let frame = issue_statement();
        assert_eq!(frame.class_name, "logstash_encoder::macros::tests");
        assert_eq!(frame.method_name, "issue_statement");
        assert!(frame.file_name.ends_with("macros.rs"));
        assert!(frame.line_number > 0);
    }

    #[test]
    fn test_log_event_macro() {
        let event = log_event!(LogLevel::Warn, "app.cache", "evicted {} entries", 12);
        assert_eq!(event.level, LogLevel::Warn);
        assert_eq!(event.message, "evicted 12 entries");
        assert_eq!(event.logger_name, "app.cache");
        assert_eq!(event.caller_data[0].method_name, "test_log_event_macro");
    }
}
