//! Compile-time switches shared by the `da_*` crates.
//!
//! A crate declares its aliases once with [`define_alias!`], usually inside a
//! `cfg` module, and then uses each alias as a macro:
//!
//! ```
//! mod cfg {
//!     da_cfg::define_alias! {
//!         #[cfg(debug_assertions)] => debug,
//!         #[cfg(any())] => never,
//!     }
//! }
//!
//! // Item or statement form: the tokens are kept only when the alias is active.
//! cfg::never! { compile_error!("removed"); }
//!
//! // Branch form: picks one side.
//! let checked = cfg::debug! { if { true } else { false } };
//! assert_eq!(checked, cfg!(debug_assertions));
//!
//! // Empty form: a `bool` constant.
//! assert!(!cfg::never!());
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Switches

/// The expansion of an alias whose condition holds.
///
/// Usually reached through an alias generated by [`define_alias!`].
#[doc(hidden)]
#[macro_export]
macro_rules! enabled {
    () => {
        true
    };
    (if { $($p:tt)* } else { $($n:tt)* }) => {
        $($p)*
    };
    ($($p:tt)*) => {
        $($p)*
    };
}

/// The expansion of an alias whose condition does not hold.
///
/// Usually reached through an alias generated by [`define_alias!`].
#[doc(hidden)]
#[macro_export]
macro_rules! disabled {
    () => {
        false
    };
    (if { $($p:tt)* } else { $($n:tt)* }) => {
        $($n)*
    };
    ($($p:tt)*) => {};
}

// -----------------------------------------------------------------------------
// Alias

/// Defines one macro per `#[cfg(..)] => name` pair.
///
/// Each generated macro re-exports [`enabled!`] when its condition is active
/// and [`disabled!`] otherwise, so the condition is evaluated in the crate
/// that invokes `define_alias!`, not in this one.
#[macro_export]
macro_rules! define_alias {
    ($(#[cfg($meta:meta)] => $name:ident),+ $(,)?) => {
        $(
            #[cfg($meta)]
            #[doc = concat!("Keeps its input: `cfg(", stringify!($meta), ")` is active.")]
            pub use $crate::enabled as $name;

            #[cfg(not($meta))]
            #[doc = concat!("Drops its input: `cfg(", stringify!($meta), ")` is inactive.")]
            pub use $crate::disabled as $name;
        )+
    };
}
