//! `define_port_error!`: declare a port error enum and its constructors.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor.
//! Struct-variant fields are taken as `impl Into<T>`, so callers can pass
//! `&str` for `String` fields; unit variants get a no-argument constructor.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        /// Failures a pantry store might report.
        pub enum StoreError {
            Offline => "store offline",
            Missing { user: String } => "no document for {user}",
            Stale { expected: u32, actual: u32 } => "stale revision {expected}, found {actual}",
        }
    }

    #[rstest]
    fn unit_variants_get_a_bare_constructor() {
        assert_eq!(StoreError::offline(), StoreError::Offline);
        assert_eq!(StoreError::offline().to_string(), "store offline");
    }

    #[rstest]
    fn string_fields_accept_borrowed_input() {
        let err = StoreError::missing("ada");
        assert_eq!(err.to_string(), "no document for ada");
    }

    #[rstest]
    fn numeric_fields_keep_their_type() {
        let err = StoreError::stale(3_u32, 5_u32);
        assert_eq!(
            err,
            StoreError::Stale {
                expected: 3,
                actual: 5
            }
        );
        assert_eq!(err.to_string(), "stale revision 3, found 5");
    }
}
