//! Macros for ergonomic state machine construction.

/// Declare an event enum with one variant per event type.
///
/// Each variant wraps a payload type of the same name. The macro generates
/// `From<Payload>` for every variant and a `name()` accessor returning the
/// variant name.
///
/// # Example
///
/// ```
/// use handover::event_enum;
///
/// #[derive(Debug, Clone)]
/// pub struct Coin { pub cents: u32 }
/// #[derive(Debug, Clone)]
/// pub struct Push;
///
/// event_enum! {
///     #[derive(Debug, Clone)]
///     pub enum TurnstileEvent {
///         Coin,
///         Push,
///     }
/// }
///
/// let event: TurnstileEvent = Coin { cents: 25 }.into();
/// assert_eq!(event.name(), "Coin");
/// assert!(matches!(TurnstileEvent::from(Push), TurnstileEvent::Push(_)));
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant($variant)
            ),+
        }

        impl $name {
            /// Name of the event type carried by this value.
            #[allow(dead_code)]
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant)),+
                }
            }
        }

        $(
            impl ::core::convert::From<$variant> for $name {
                fn from(event: $variant) -> Self {
                    Self::$variant(event)
                }
            }
        )+
    };
}
