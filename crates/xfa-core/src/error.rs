use thiserror::Error;

/// Error type produced by the document builder.
///
/// Every variant is terminal for the build call that raised it: no retry is
/// attempted and no partially constructed tree is exposed.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The root element is missing or does not match the requested packet,
    /// a mandatory sub-section is absent, or a packet appears twice.
    #[error("malformed packet: {0}")]
    MalformedPacket(String),
    /// The input nested deeper than the fixed construction ceiling.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
    /// The caller named a packet type with no construction rule.
    #[error("unsupported packet type: {0}")]
    UnsupportedPacketType(String),
}
