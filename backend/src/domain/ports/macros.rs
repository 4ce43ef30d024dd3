//! `define_port_error!` declares a port error enum in which every variant
//! carries named context fields, together with one snake_case constructor per
//! variant.
//!
//! Constructors take `impl Into<FieldType>` so call sites can pass `&str` for
//! `String` context. Variant docs are repeated on the constructors.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[doc = $doc:literal])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[doc = $doc])*
                #[error($message)]
                $variant {
                    $(
                        #[doc = concat!(
                            "Context reported by [`",
                            stringify!($name),
                            "::",
                            stringify!($variant),
                            "`]."
                        )]
                        $field: $ty,
                    )+
                },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    $(#[doc = $doc])*
                    #[must_use]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;
