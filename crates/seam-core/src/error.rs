//! Error types for boundary-crossing conversions.
//!
//! Two layers, matching who can act on the failure:
//!
//! - [`ConversionError`] - what a converter reports when the input value's
//!   shape does not match what the target type requires. Recoverable at the
//!   boundary-crossing layer.
//! - [`MarshalError`] - what the call-site adapters surface to the
//!   collaborator that initiated the crossing, annotated with the managed
//!   type and call-site kind for diagnostics.
//!
//! Converter failures are never swallowed and never silently coerced: every
//! failure propagates to whichever collaborator initiated the crossing, since
//! only it knows whether the overall operation can be safely aborted.

use thiserror::Error;

use crate::context::CallSiteKind;

/// A value-shape failure inside a converter or an intrinsic conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The value's type doesn't match what the conversion expects.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// An integer value doesn't fit the target width.
    #[error("integer overflow: {value} doesn't fit in {target_type}")]
    IntegerOverflow { value: i64, target_type: &'static str },

    /// A float value can't be represented in the target width.
    #[error("float {value} not representable as {target_type}")]
    FloatConversion { value: f64, target_type: &'static str },

    /// No platform default conversion exists for the managed type.
    #[error("no default conversion for type '{type_name}'")]
    Unsupported { type_name: String },

    /// Domain-specific failure raised by a custom converter.
    #[error("{0}")]
    Custom(String),
}

/// A conversion failure as surfaced to the collaborator that initiated the
/// boundary crossing.
#[derive(Debug, Error)]
pub enum MarshalError {
    /// The registry has no converter and no platform default exists for the
    /// managed type. Fatal to the specific call.
    #[error("no converter for type '{managed_type}' at {site}")]
    UnsupportedType {
        managed_type: String,
        site: CallSiteKind,
    },

    /// A converter (or the intrinsic fallback) rejected the value.
    #[error("conversion of '{managed_type}' failed at {site}: {source}")]
    Conversion {
        managed_type: String,
        site: CallSiteKind,
        #[source]
        source: ConversionError,
    },
}

impl MarshalError {
    /// The call-site kind the failure occurred at.
    pub fn call_site(&self) -> CallSiteKind {
        match self {
            MarshalError::UnsupportedType { site, .. } => *site,
            MarshalError::Conversion { site, .. } => *site,
        }
    }

    /// Name of the managed type involved in the failure.
    pub fn managed_type(&self) -> &str {
        match self {
            MarshalError::UnsupportedType { managed_type, .. } => managed_type,
            MarshalError::Conversion { managed_type, .. } => managed_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_error_messages() {
        let err = ConversionError::TypeMismatch {
            expected: "i32",
            actual: "f64",
        };
        assert_eq!(err.to_string(), "type mismatch: expected i32, got f64");

        let err = ConversionError::IntegerOverflow {
            value: 300,
            target_type: "i8",
        };
        assert_eq!(err.to_string(), "integer overflow: 300 doesn't fit in i8");
    }

    #[test]
    fn marshal_error_carries_site_and_type() {
        let err = MarshalError::Conversion {
            managed_type: "int32".to_string(),
            site: CallSiteKind::CallbackParameter,
            source: ConversionError::Custom("bad".into()),
        };
        assert_eq!(err.call_site(), CallSiteKind::CallbackParameter);
        assert_eq!(err.managed_type(), "int32");
        assert_eq!(
            err.to_string(),
            "conversion of 'int32' failed at callback parameter: bad"
        );
    }

    #[test]
    fn unsupported_type_message() {
        let err = MarshalError::UnsupportedType {
            managed_type: "Color".to_string(),
            site: CallSiteKind::StructureWrite,
        };
        assert_eq!(
            err.to_string(),
            "no converter for type 'Color' at structure write"
        );
    }
}
