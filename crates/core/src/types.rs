/// Document identifiers are opaque strings (project ids are millisecond
/// creation timestamps rendered in decimal).
pub type DocId = String;
