//! Component writer (RFC 5545 §3.1, §3.4).
//!
//! Writes `BEGIN`, every property group, every child group, then `END`, each
//! line terminated by CRLF. Lines are never folded.

use std::io;

use crate::rfc::ical::core::Component;

const CRLF: &str = "\r\n";

/// Serializes a component tree to a string.
#[must_use]
pub fn write(component: &Component) -> String {
    let mut out = String::new();
    push_component(&mut out, component);
    out
}

/// Serializes several top-level components back to back.
#[must_use]
pub fn write_all(components: &[Component]) -> String {
    let mut out = String::new();
    for component in components {
        push_component(&mut out, component);
    }
    out
}

/// Serializes a component tree into `sink`.
///
/// ## Errors
/// Returns any error raised by `sink`.
pub fn write_to<W: io::Write + ?Sized>(component: &Component, sink: &mut W) -> io::Result<()> {
    sink.write_all(write(component).as_bytes())
}

fn push_component(out: &mut String, component: &Component) {
    out.push_str("BEGIN:");
    out.push_str(&component.name);
    out.push_str(CRLF);

    for property in component.properties.values() {
        out.push_str(&property.to_string());
        out.push_str(CRLF);
    }

    for child in component.children.values() {
        push_component(out, child);
    }

    out.push_str("END:");
    out.push_str(&component.name);
    out.push_str(CRLF);
}
