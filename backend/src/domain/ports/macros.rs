//! Helper macro for declaring port error enums.
//!
//! `define_port_error!` expands to a `thiserror` enum plus one snake_case
//! constructor per variant. Constructor parameters take `impl Into<T>` so
//! adapters can pass `&str` or `String` for message fields.

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
    //! Regression coverage for this module.
    use rstest::rstest;

    define_port_error! {
        pub enum SamplePortError {
            Unreachable => "store unreachable",
            Rejected { message: String } => "store rejected write: {message}",
            Throttled { attempts: u32 } => "throttled after {attempts} attempts",
            Partial { message: String, written: u32 } => "partial write ({written}): {message}",
        }
    }

    #[rstest]
    #[case(SamplePortError::unreachable(), "store unreachable")]
    #[case(SamplePortError::rejected("duplicate id"), "store rejected write: duplicate id")]
    #[case(SamplePortError::throttled(3_u32), "throttled after 3 attempts")]
    #[case(SamplePortError::partial(String::from("timeout"), 2_u32), "partial write (2): timeout")]
    fn constructors_render_messages(#[case] error: SamplePortError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn constructors_build_matching_variants() {
        assert_eq!(
            SamplePortError::rejected("x"),
            SamplePortError::Rejected {
                message: "x".to_owned()
            }
        );
    }
}
