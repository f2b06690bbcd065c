//! `define_port_error!` builds the error enums returned by domain ports.
//!
//! Each variant gets a snake_case constructor taking `impl Into<_>` for its
//! fields. A single-field tuple variant wraps another error type and also
//! gets a `From` impl so adapters can use `?` on it.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident ( $inner:ty )) => {
        ::paste::paste! {
            pub fn [<$variant:snake>](inner: impl Into<$inner>) -> Self {
                Self::$variant(inner.into())
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_fields $variant () () $( $field : $ty, )*);
    };

    (@ctor_fields $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_fields $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_fields
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (@from $name:ident $variant:ident ( $inner:ty )) => {
        impl From<$inner> for $name {
            fn from(inner: $inner) -> Self {
                Self::$variant(inner)
            }
        }
    };

    (@from $name:ident $variant:ident $($rest:tt)*) => {};

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
                    $( ( $inner:ty ) )?
                    $( { $($field:ident : $ty:ty),* $(,)? } )?
                    => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( ( $inner ) )? $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( ( $inner ) )? $( { $($field : $ty),* } )?);
            )*
        }

        $(
            define_port_error!(@from $name $variant $( ( $inner ) )?);
        )*
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    #[error("inner {0}")]
    pub struct Inner(pub u16);

    define_port_error! {
        pub enum SamplePortError {
            Wrapped(Inner) => "{0}",
            Missing => "missing",
            Broken { message: String } => "broken: {message}",
            Counted { message: String, count: u32 } => "{message} x{count}",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(SamplePortError::missing().to_string(), "missing");
    }

    #[test]
    fn field_constructors_accept_borrowed_strings() {
        assert_eq!(SamplePortError::broken("socket").to_string(), "broken: socket");
        assert_eq!(SamplePortError::counted("retry", 3_u32).to_string(), "retry x3");
    }

    #[test]
    fn wrapped_variants_convert_with_from() {
        let err: SamplePortError = Inner(404).into();
        assert_eq!(err, SamplePortError::wrapped(Inner(404)));
        assert_eq!(err.to_string(), "inner 404");
    }
}
