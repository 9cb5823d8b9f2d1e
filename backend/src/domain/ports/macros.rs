//! Helper macro generating port error enums with snake_case constructors.
//!
//! Each variant becomes a `thiserror` variant plus a constructor named after
//! it, so adapters write `SwimmerRepositoryError::connection(msg)`.

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
        pub enum LedgerPortError {
            Offline => "ledger offline",
            Rejected { reason: String } => "ledger rejected write: {reason}",
            Missing { row: i64 } => "ledger row {row} missing",
            Partial { reason: String, row: i64 } => "row {row} partially written: {reason}",
        }
    }

    #[rstest]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LedgerPortError::offline(), LedgerPortError::Offline);
    }

    #[rstest]
    fn string_fields_accept_str() {
        let err = LedgerPortError::rejected("duplicate");
        assert_eq!(err.to_string(), "ledger rejected write: duplicate");
    }

    #[rstest]
    fn numeric_fields_keep_their_type() {
        let err = LedgerPortError::missing(7_i64);
        assert_eq!(err, LedgerPortError::Missing { row: 7 });
    }

    #[rstest]
    fn mixed_fields_are_ordered_as_declared() {
        let err = LedgerPortError::partial("disk full", 3_i64);
        assert_eq!(err.to_string(), "row 3 partially written: disk full");
    }
}
