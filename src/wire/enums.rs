//! Open string-enum generation
//!
//! Every enum field in the API is documented as forward-extensible: the
//! server may start returning values that didn't exist when a given SDK
//! version shipped, and clients are required to tolerate them. [`wire_enum!`]
//! generates the whole pattern for each value set: known cases mapping
//! symbol to wire string, plus an `Unknown` tail case that preserves any
//! other string losslessly.
//!
//! Generated per enum:
//!
//! - `as_str()` returning the wire string (the original string for `Unknown`)
//! - `From<&str>` / `From<String>`, so every construction entry point accepts
//!   either the symbolic case or a raw wire string
//! - `Display`, `Serialize`, and [`FromWire`](crate::wire::FromWire), none of
//!   which can fail on an out-of-set value

/// Declare an open wire enum: known cases plus a lossless `Unknown` tail
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $wire:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
            /// A value not yet known to this SDK version, preserved verbatim
            Unknown(String),
        }

        impl $name {
            /// The string this value takes on the wire
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Unknown(raw) => raw.as_str(),
                }
            }

            /// Whether this is a case known to this SDK version
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Unknown(_))
            }
        }

        impl ::std::convert::From<&str> for $name {
            fn from(raw: &str) -> Self {
                match raw {
                    $( $wire => Self::$variant, )+
                    other => Self::Unknown(other.to_string()),
                }
            }
        }

        impl ::std::convert::From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $( $wire => Self::$variant, )+
                    _ => Self::Unknown(raw),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl $crate::wire::FromWire for $name {
            fn from_wire(
                value: ::serde_json::Value,
            ) -> ::std::result::Result<Self, $crate::types::WireError> {
                match value {
                    ::serde_json::Value::String(raw) => Ok(Self::from(raw)),
                    other => Err($crate::types::WireError::type_mismatch(
                        "string",
                        $crate::wire::decode::json_type_name(&other),
                    )),
                }
            }
        }
    };
}

pub(crate) use wire_enum;

#[cfg(test)]
mod tests {
    use crate::wire::{FromWire, ToWire};
    use serde_json::json;

    wire_enum! {
        /// Settlement status of a test transaction
        pub enum SettlementStatus {
            Pending => "pending",
            Settled => "settled",
        }
    }

    #[test]
    fn test_known_case_round_trips() {
        let status = SettlementStatus::from_wire(json!("settled")).unwrap();
        assert_eq!(status, SettlementStatus::Settled);
        assert_eq!(status.to_wire().unwrap(), json!("settled"));
    }

    #[test]
    fn test_unknown_value_is_preserved_not_rejected() {
        let status = SettlementStatus::from_wire(json!("reversed")).unwrap();
        assert_eq!(status, SettlementStatus::Unknown("reversed".to_string()));
        assert!(!status.is_known());
        assert_eq!(status.to_wire().unwrap(), json!("reversed"));
    }

    #[test]
    fn test_from_str_accepts_raw_wire_values() {
        assert_eq!(SettlementStatus::from("pending"), SettlementStatus::Pending);
        assert_eq!(
            SettlementStatus::from("chargeback"),
            SettlementStatus::Unknown("chargeback".to_string())
        );
    }

    #[test]
    fn test_display_matches_wire_string() {
        assert_eq!(SettlementStatus::Settled.to_string(), "settled");
        assert_eq!(
            SettlementStatus::Unknown("reversed".to_string()).to_string(),
            "reversed"
        );
    }

    #[test]
    fn test_non_string_is_a_type_mismatch() {
        let err = SettlementStatus::from_wire(json!(42)).unwrap_err();
        assert_eq!(
            err,
            crate::types::WireError::type_mismatch("string", "number")
        );
    }
}
