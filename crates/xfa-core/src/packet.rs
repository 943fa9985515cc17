use bitflags::bitflags;

bitflags! {
    /// Match and parse rules attached to each packet type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PacketFlags: u8 {
        /// The root element's local name must equal the expected name.
        const COMPLETE_MATCH = 0x01;
        /// Attribute-driven parsing: the loader copies element attributes.
        /// Without it parsing is purely structural.
        const ATTRIBUTES = 0x02;
    }
}

/// Static description of one packet's root contract.
#[derive(Debug, Clone, Copy)]
pub struct PacketInfo {
    /// Expected root element local name (empty for the user packet, which
    /// accepts any root).
    pub name: &'static str,
    pub flags: PacketFlags,
}

/// The packets an XDP document is made of.
///
/// Each value selects exactly one construction rule in the builder; the
/// dispatch is an exhaustive match so adding a packet type here will not
/// compile until it has a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketType {
    /// The enclosing document wrapper that aggregates the other packets.
    Xdp,
    Config,
    Template,
    Form,
    /// The `datasets` packet; content shape is inferred, never declared.
    Data,
    LocaleSet,
    ConnectionSet,
    SourceSet,
    Xdc,
    /// User-extension packet; any root element is accepted.
    User,
}

const COMPLETE: PacketFlags = PacketFlags::COMPLETE_MATCH;
const COMPLETE_ATTRS: PacketFlags = PacketFlags::COMPLETE_MATCH.union(PacketFlags::ATTRIBUTES);

static XDP: PacketInfo = PacketInfo { name: "xdp", flags: COMPLETE };
static CONFIG: PacketInfo = PacketInfo { name: "config", flags: COMPLETE_ATTRS };
static TEMPLATE: PacketInfo = PacketInfo { name: "template", flags: COMPLETE_ATTRS };
static FORM: PacketInfo = PacketInfo { name: "form", flags: COMPLETE_ATTRS };
static DATA: PacketInfo = PacketInfo { name: "datasets", flags: COMPLETE };
static LOCALE_SET: PacketInfo = PacketInfo { name: "localeSet", flags: COMPLETE };
static CONNECTION_SET: PacketInfo = PacketInfo { name: "connectionSet", flags: COMPLETE };
static SOURCE_SET: PacketInfo = PacketInfo { name: "sourceSet", flags: COMPLETE };
static XDC: PacketInfo = PacketInfo { name: "xdc", flags: COMPLETE };
static USER: PacketInfo = PacketInfo { name: "", flags: PacketFlags::empty() };

impl PacketType {
    /// Root contract for this packet.
    pub fn info(self) -> &'static PacketInfo {
        match self {
            PacketType::Xdp => &XDP,
            PacketType::Config => &CONFIG,
            PacketType::Template => &TEMPLATE,
            PacketType::Form => &FORM,
            PacketType::Data => &DATA,
            PacketType::LocaleSet => &LOCALE_SET,
            PacketType::ConnectionSet => &CONNECTION_SET,
            PacketType::SourceSet => &SOURCE_SET,
            PacketType::Xdc => &XDC,
            PacketType::User => &USER,
        }
    }

    /// Map a packet name (`"config"`, `"datasets"`, ...) to its type.
    pub fn from_name(name: &str) -> Option<PacketType> {
        match name {
            "xdp" => Some(PacketType::Xdp),
            "config" => Some(PacketType::Config),
            "template" => Some(PacketType::Template),
            "form" => Some(PacketType::Form),
            "datasets" => Some(PacketType::Data),
            "localeSet" => Some(PacketType::LocaleSet),
            "connectionSet" => Some(PacketType::ConnectionSet),
            "sourceSet" => Some(PacketType::SourceSet),
            "xdc" => Some(PacketType::Xdc),
            "user" => Some(PacketType::User),
            _ => None,
        }
    }

    /// Packet rule handling a given XDP child element, by local name.
    /// Children that match no known packet are handled by the user rule.
    pub fn for_element(local_name: &str) -> Option<PacketType> {
        match PacketType::from_name(local_name) {
            // An xdp inside an xdp is not a packet boundary.
            Some(PacketType::Xdp) | None => None,
            some => some,
        }
    }
}
