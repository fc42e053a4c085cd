//! Declarative helpers
//!
//! - [`params!`](crate::params): typed `name => value` lists for the
//!   pair-based operations
//! - [`class_params!`](crate::class_params): attach parameters to a Rust
//!   type, with one accessor function per name

/// Build a list of `(name, Binding)` pairs.
///
/// Values go through `Binding::from`, so plain numbers, strings, bools,
/// JSON values and `Binding::function(..)` providers all work.
///
/// ```
/// use classparam::{params, Binding, Registry};
///
/// let registry = Registry::new();
/// registry
///     .declare_with_defaults("Session", params! {
///         SESSION_TIMEOUT => 30,
///         SESSION_ID_LENGTH => 20,
///         STARTED => Binding::function(|| serde_json::json!("now")),
///     })
///     .unwrap();
/// assert_eq!(registry.get("Session", "SESSION_TIMEOUT").unwrap(), 30);
/// ```
#[macro_export]
macro_rules! params {
    ($($name:ident => $value:expr),* $(,)?) => {
        ::std::vec![
            $((
                $crate::param_name(::std::stringify!($name)),
                $crate::Binding::from($value),
            )),*
        ]
    };
}

/// Attach parameters to a type through the global registry.
///
/// Generates `declare_params()` plus one associated function per name,
/// which reads the current value every time it is called.
///
/// ```
/// use classparam::class_params;
///
/// struct Session;
///
/// class_params!(Session { SESSION_TIMEOUT, SESSION_ID_LENGTH });
///
/// Session::declare_params().unwrap();
/// assert!(Session::SESSION_TIMEOUT().is_err());
///
/// classparam::configure(
///     classparam::ClassId::of::<Session>(),
///     [("SESSION_TIMEOUT", 30), ("SESSION_ID_LENGTH", 20)],
/// )
/// .unwrap();
/// assert_eq!(Session::SESSION_TIMEOUT().unwrap(), 30);
/// ```
#[macro_export]
macro_rules! class_params {
    ($ty:ty { $($name:ident),+ $(,)? }) => {
        impl $ty {
            /// Declare this type's parameters in the global registry
            #[track_caller]
            pub fn declare_params() -> $crate::Result<()> {
                $crate::declare(
                    $crate::ClassId::of::<Self>(),
                    [$(::std::stringify!($name)),+],
                )
            }

            $(
                #[allow(non_snake_case)]
                #[track_caller]
                pub fn $name() -> $crate::Result<$crate::Value> {
                    $crate::get(::std::any::type_name::<Self>(), ::std::stringify!($name))
                }
            )+
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{BindingKind, ClassId, ParamError, Registry};
    use serde_json::json;

    struct Connection;

    class_params!(Connection { CONNECT_TIMEOUT, RETRIES });

    #[test]
    fn params_builds_typed_pairs() {
        let pairs = params! {
            TIMEOUT => 30,
            NAME => "abc",
            DEBUG => false,
        };
        assert_eq!(pairs.len(), 3);
        assert_eq!(&*pairs[1].0, "NAME");
        assert!(pairs.iter().all(|(_, b)| b.kind() == BindingKind::Constant));
    }

    #[test]
    fn params_feeds_registry_operations() {
        let registry = Registry::new();
        registry
            .declare_with_defaults("Macro", params! { A => 1, B => json!([1, 2]) })
            .unwrap();
        registry.configure("Macro", params! { A => 2 }).unwrap();

        assert_eq!(registry.get("Macro", "A").unwrap(), json!(2));
        assert_eq!(registry.get("Macro", "B").unwrap(), json!([1, 2]));
    }

    #[test]
    fn class_params_generates_accessors() {
        Connection::declare_params().unwrap();
        assert!(matches!(
            Connection::CONNECT_TIMEOUT(),
            Err(ParamError::UninitializedParameter { .. })
        ));

        crate::configure(
            ClassId::of::<Connection>(),
            params! { CONNECT_TIMEOUT => 5, RETRIES => 3 },
        )
        .unwrap();
        assert_eq!(Connection::CONNECT_TIMEOUT().unwrap(), json!(5));
        assert_eq!(Connection::RETRIES().unwrap(), json!(3));

        let err = Connection::declare_params().unwrap_err();
        assert!(matches!(err, ParamError::DuplicateParameter { .. }));
    }
}
