//! Logging macros that optionally forward to the `log` crate.
//!
//! The `cfg` is evaluated when this crate is compiled, so downstream crates only
//! need to forward their own `logging` feature to `relic-common/logging`.

#[cfg(feature = "logging")]
#[macro_export]
#[doc(hidden)]
macro_rules! ldebug {
    ($($arg:tt)+) => {
        $crate::__log::debug!($($arg)+)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
#[doc(hidden)]
macro_rules! ldebug {
    ($($arg:tt)+) => {{
        let _ = format_args!($($arg)+);
    }};
}

#[cfg(feature = "logging")]
#[macro_export]
#[doc(hidden)]
macro_rules! ltrace {
    ($($arg:tt)+) => {
        $crate::__log::trace!($($arg)+)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
#[doc(hidden)]
macro_rules! ltrace {
    ($($arg:tt)+) => {{
        let _ = format_args!($($arg)+);
    }};
}

#[cfg(feature = "logging")]
#[macro_export]
#[doc(hidden)]
macro_rules! lwarn {
    ($($arg:tt)+) => {
        $crate::__log::warn!($($arg)+)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
#[doc(hidden)]
macro_rules! lwarn {
    ($($arg:tt)+) => {{
        let _ = format_args!($($arg)+);
    }};
}
