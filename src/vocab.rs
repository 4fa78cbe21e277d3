//! RDF and XSD vocabulary constants.
//!
//! Datatype identifiers used by the coercion engine, plus the family
//! predicates that decide which parser a literal goes through.

/// RDF vocabulary constants
pub mod rdf {
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// XSD vocabulary constants
pub mod xsd {
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const NORMALIZED_STRING: &str = "http://www.w3.org/2001/XMLSchema#normalizedString";
    pub const TOKEN: &str = "http://www.w3.org/2001/XMLSchema#token";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
    pub const UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";
    pub const UNSIGNED_SHORT: &str = "http://www.w3.org/2001/XMLSchema#unsignedShort";
    pub const UNSIGNED_BYTE: &str = "http://www.w3.org/2001/XMLSchema#unsignedByte";
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
    pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
    pub const NON_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonPositiveInteger";
    pub const NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";

    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const TIME: &str = "http://www.w3.org/2001/XMLSchema#time";
    pub const DURATION: &str = "http://www.w3.org/2001/XMLSchema#duration";
    pub const DAY_TIME_DURATION: &str = "http://www.w3.org/2001/XMLSchema#dayTimeDuration";
    pub const YEAR_MONTH_DURATION: &str = "http://www.w3.org/2001/XMLSchema#yearMonthDuration";

    /// The default integer family.
    ///
    /// `xsd:long` is not a member: it always maps to the 64-bit
    /// family, even for values that would fit the narrower one.
    #[inline]
    pub fn is_integer_family(datatype_iri: &str) -> bool {
        matches!(
            datatype_iri,
            INTEGER
                | INT
                | SHORT
                | BYTE
                | UNSIGNED_INT
                | UNSIGNED_SHORT
                | NON_NEGATIVE_INTEGER
                | POSITIVE_INTEGER
                | NON_POSITIVE_INTEGER
                | NEGATIVE_INTEGER
        )
    }

    #[inline]
    pub fn is_string_like(datatype_iri: &str) -> bool {
        matches!(datatype_iri, STRING | NORMALIZED_STRING | TOKEN)
    }

    #[inline]
    pub fn is_duration(datatype_iri: &str) -> bool {
        matches!(datatype_iri, DURATION | DAY_TIME_DURATION | YEAR_MONTH_DURATION)
    }

    /// Inclusive bounds for the bounded integer subtypes.
    #[inline]
    pub fn integer_bounds(datatype_iri: &str) -> Option<(i128, i128)> {
        match datatype_iri {
            BYTE => Some((i8::MIN as i128, i8::MAX as i128)),
            SHORT => Some((i16::MIN as i128, i16::MAX as i128)),
            INT => Some((i32::MIN as i128, i32::MAX as i128)),
            UNSIGNED_SHORT => Some((0, u16::MAX as i128)),
            UNSIGNED_INT => Some((0, u32::MAX as i128)),
            POSITIVE_INTEGER => Some((1, i128::MAX)),
            NON_NEGATIVE_INTEGER => Some((0, i128::MAX)),
            NEGATIVE_INTEGER => Some((i128::MIN, -1)),
            NON_POSITIVE_INTEGER => Some((i128::MIN, 0)),
            _ => None,
        }
    }
}
