use ::serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
// CodecOptions

/// Lenient-parsing configuration of the leaf codec.
///
/// The defaults are the lenient settings recorded payloads are read with.
/// The struct reads its camelCase field names from any serde format, missing
/// fields keep their default:
///
/// ```
/// use replay_serde::CodecOptions;
///
/// let options: CodecOptions =
///     serde_json::from_str(r#"{ "failOnUnknownFields": true }"#).unwrap();
///
/// assert!(options.fail_on_unknown_fields);
/// assert!(options.single_value_as_sequence);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodecOptions {
    /// Accept a single value where a sequence is expected, as a one-element
    /// sequence.
    pub single_value_as_sequence: bool,
    /// Reject struct payloads carrying fields the struct does not declare.
    pub fail_on_unknown_fields: bool,
    /// Read `""` as an absent optional value, or as an empty struct, map or
    /// sequence.
    pub empty_string_as_absent: bool,
    /// Read enums by variant name only. When `false`, the ordinal of a unit
    /// variant is accepted as well. Enums are always written by name.
    pub enums_by_name: bool,
    /// Fail to encode a leaf whose encoding is an empty object.
    pub fail_on_empty_structures: bool,
}

impl CodecOptions {
    /// The lenient settings, same as [`CodecOptions::default`].
    pub const LENIENT: Self = Self {
        single_value_as_sequence: true,
        fail_on_unknown_fields: false,
        empty_string_as_absent: true,
        enums_by_name: true,
        fail_on_empty_structures: false,
    };

    /// Settings that accept only payloads matching the declared types exactly.
    pub const STRICT: Self = Self {
        single_value_as_sequence: false,
        fail_on_unknown_fields: true,
        empty_string_as_absent: false,
        enums_by_name: true,
        fail_on_empty_structures: true,
    };
}

impl Default for CodecOptions {
    #[inline]
    fn default() -> Self {
        Self::LENIENT
    }
}

// -----------------------------------------------------------------------------
// Tests
