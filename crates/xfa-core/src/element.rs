/// Known form-schema element names, plus an extension fallback.
///
/// The builder never rejects a tag for being absent from this vocabulary:
/// unrecognized tags map to [`XfaElement::Unknown`] and keep their raw name
/// on the form node, so user-extension packets survive intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XfaElement {
    Xdp,
    Config,
    Template,
    Form,
    Datasets,
    DataGroup,
    DataValue,
    LocaleSet,
    ConnectionSet,
    SourceSet,
    Xdc,
    Packet,
    Subform,
    Field,
    Draw,
    ExclGroup,
    Area,
    PageSet,
    PageArea,
    ContentArea,
    Value,
    Bind,
    Ui,
    Caption,
    Font,
    Border,
    Event,
    Script,
    Present,
    Acrobat,
    Locale,
    CalendarSymbols,
    Connect,
    Query,
    Select,
    Insert,
    Update,
    Delete,
    Unknown,
}

impl XfaElement {
    /// Map a tag's local name onto the vocabulary, `Unknown` as fallback.
    pub fn from_name(name: &str) -> XfaElement {
        match name {
            "xdp" => XfaElement::Xdp,
            "config" => XfaElement::Config,
            "template" => XfaElement::Template,
            "form" => XfaElement::Form,
            "datasets" => XfaElement::Datasets,
            "dataGroup" => XfaElement::DataGroup,
            "dataValue" => XfaElement::DataValue,
            "localeSet" => XfaElement::LocaleSet,
            "connectionSet" => XfaElement::ConnectionSet,
            "sourceSet" => XfaElement::SourceSet,
            "xdc" => XfaElement::Xdc,
            "packet" => XfaElement::Packet,
            "subform" => XfaElement::Subform,
            "field" => XfaElement::Field,
            "draw" => XfaElement::Draw,
            "exclGroup" => XfaElement::ExclGroup,
            "area" => XfaElement::Area,
            "pageSet" => XfaElement::PageSet,
            "pageArea" => XfaElement::PageArea,
            "contentArea" => XfaElement::ContentArea,
            "value" => XfaElement::Value,
            "bind" => XfaElement::Bind,
            "ui" => XfaElement::Ui,
            "caption" => XfaElement::Caption,
            "font" => XfaElement::Font,
            "border" => XfaElement::Border,
            "event" => XfaElement::Event,
            "script" => XfaElement::Script,
            "present" => XfaElement::Present,
            "acrobat" => XfaElement::Acrobat,
            "locale" => XfaElement::Locale,
            "calendarSymbols" => XfaElement::CalendarSymbols,
            "connect" => XfaElement::Connect,
            "query" => XfaElement::Query,
            "select" => XfaElement::Select,
            "insert" => XfaElement::Insert,
            "update" => XfaElement::Update,
            "delete" => XfaElement::Delete,
            _ => XfaElement::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_resolve() {
        assert_eq!(XfaElement::from_name("subform"), XfaElement::Subform);
        assert_eq!(XfaElement::from_name("pageSet"), XfaElement::PageSet);
        assert_eq!(XfaElement::from_name("config"), XfaElement::Config);
    }

    #[test]
    fn unknown_names_fall_back() {
        assert_eq!(XfaElement::from_name("vendorThing"), XfaElement::Unknown);
        assert_eq!(XfaElement::from_name(""), XfaElement::Unknown);
    }
}
