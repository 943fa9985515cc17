//! Typed XFA form-node tree and the packet builder that produces it.
//!
//! The builder walks a generic XML tree (see `xfa-xml`) and transcribes it
//! into typed form nodes, one construction rule per XDP packet. Input is
//! untrusted: depth is bounded by a hard recursion ceiling, malformed
//! packets fail the whole build, and no partial tree ever escapes.

mod builder;
mod document;
mod element;
mod error;
mod node;
mod packet;

pub use builder::{DocumentBuilder, MAX_RECURSION_DEPTH};
pub use document::Document;
pub use element::XfaElement;
pub use error::ParseError;
pub use node::{ContentShape, FormNode};
pub use packet::{PacketFlags, PacketInfo, PacketType};
