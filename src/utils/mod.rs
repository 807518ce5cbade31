//! Helper utils used in project.

use chrono::Utc;

/// Generates [`Debug`] implementation for a provided structure with name of
/// this structure.
///
/// In debug print of this structure will be printed just a name of the provided
/// structure.
///
/// # Example
///
/// ```
/// # use zoom_sdk_bridge::impl_debug_by_struct_name;
/// struct Foo;
///
/// impl_debug_by_struct_name!(Foo);
///
/// assert_eq!(format!("{:?}", Foo), "Foo")
/// ```
///
/// [`Debug`]: std::fmt::Debug
#[macro_export]
macro_rules! impl_debug_by_struct_name {
    ($mock:ty) => {
        impl ::std::fmt::Debug for $mock {
            fn fmt(
                &self,
                f: &mut ::std::fmt::Formatter<'_>,
            ) -> ::std::result::Result<(), ::std::fmt::Error> {
                f.debug_struct(stringify!($mock)).finish()
            }
        }
    };
}

/// Declares a `#[repr(u32)]` enumeration mirroring an SDK enumeration.
///
/// Every listed variant gets its SDK discriminant. The variant after `_ =>`
/// absorbs any value the SDK may produce which is not listed, so the
/// generated [`From`]`<u32>` implementation is total.
///
/// # Example
///
/// ```
/// # use zoom_sdk_bridge::sdk_enum;
/// sdk_enum! {
///     pub enum Switch {
///         Off = 0,
///         On = 1,
///         _ => Unexpected = 2,
///     }
/// }
///
/// assert_eq!(Switch::from(1), Switch::On);
/// assert_eq!(Switch::from(42), Switch::Unexpected);
/// assert_eq!(u32::from(Switch::Off), 0);
/// ```
#[macro_export]
macro_rules! sdk_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal,
            )+
            _ => $fallback:ident = $fallback_value:literal $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[repr(u32)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )+
            /// Value which is not known to this library.
            $fallback = $fallback_value,
        }

        impl ::std::convert::From<u32> for $name {
            #[inline]
            fn from(value: u32) -> Self {
                match value {
                    $( $value => Self::$variant, )+
                    _ => Self::$fallback,
                }
            }
        }

        impl ::std::convert::From<$name> for u32 {
            #[inline]
            fn from(value: $name) -> Self {
                value as u32
            }
        }
    };
}

/// Returns microseconds passed since the Unix epoch.
///
/// Used to stamp raw media frames at the moment of their delivery.
#[inline]
#[must_use]
pub fn epoch_micros() -> i64 {
    let now = Utc::now();
    now.timestamp() * 1_000_000 + i64::from(now.timestamp_subsec_micros())
}

/// Returns milliseconds passed since the Unix epoch.
#[inline]
#[must_use]
pub fn epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}
