//! `define_port_error!`: error enums for driven ports.
//!
//! Every variant carries named fields. The macro derives `thiserror::Error`,
//! adds one snake_case constructor per variant taking `impl Into<_>` for each
//! field, and a `kind()` label for structured logs.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                )+

                /// Snake-case variant name for log fields.
                #[must_use]
                pub fn kind(&self) -> &'static str {
                    match self {
                        $(Self::$variant { .. } => stringify!([<$variant:snake>]),)+
                    }
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        /// Sample enum exercising the generated helpers.
        pub enum UpstreamError {
            Unreachable { message: String } => "upstream unreachable: {message}",
            Rejected { message: String, status: u16 } => "upstream rejected ({status}): {message}",
        }
    }

    #[rstest]
    fn constructors_convert_their_arguments() {
        assert_eq!(
            UpstreamError::rejected("row level security", 403_u16).to_string(),
            "upstream rejected (403): row level security"
        );
    }

    #[rstest]
    #[case(UpstreamError::unreachable("timeout"), "unreachable")]
    #[case(UpstreamError::rejected("denied", 401_u16), "rejected")]
    fn kind_names_the_variant(#[case] error: UpstreamError, #[case] expected: &str) {
        assert_eq!(error.kind(), expected);
    }
}
