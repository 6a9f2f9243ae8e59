use std::any::TypeId;

use mime::Mime;

/// The capability contract a media type codec implements to take part in
/// negotiation.
///
/// The engine never encodes or decodes bodies itself; it only *selects* a
/// formatter. Implementations therefore answer three questions: which media
/// types they speak, and whether they can read/write a given semantic type.
///
/// The declared media-type list is ordered, and the order matters twice: the
/// first entry is the default when no negotiation header is present, and
/// earlier entries win ties within a single formatter.
///
/// Declared media types are matched case-sensitively against header wildcards.
///
/// Registered formatters are shared immutably across negotiation calls
/// (`Arc<dyn MediaTypeFormatter>`) and must not change their answers after
/// publication.
pub trait MediaTypeFormatter: Send + Sync {
    /// The media types this formatter can produce and consume, in preference order.
    fn supported_media_types(&self) -> Vec<Mime>;

    /// Returns true if this formatter can decode a request body into `target`.
    fn can_read(&self, target: TypeId) -> bool;

    /// Returns true if this formatter can encode a `target` value into a response body.
    fn can_write(&self, target: TypeId) -> bool;
}
