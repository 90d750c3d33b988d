/// Panics unless the expression matches the pattern (and the optional guard).
///
/// Bindings in the guard borrow from the value, so compare through `*`.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat $(if $guard:expr)? $(,)?) => {{
        let value = $expr;
        #[allow(unused_variables, reason = "bindings may only be used by the guard")]
        let matched = ::core::matches!(&value, $pat $(if $guard)?);
        ::core::assert!(
            matched,
            "value {:?} does not match `{}`",
            value,
            ::core::stringify!($pat $(if $guard)?),
        );
    }};
}
