// file: src/notebook/format.rs
// description: notebook JSON serialization with nbformat's one-space indentation
// reference: https://docs.rs/serde_json

use serde::Serialize;
use serde::ser::Error as _;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;

pub fn to_notebook_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
    value.serialize(&mut serializer)?;

    let mut out = String::from_utf8(buf).map_err(serde_json::Error::custom)?;
    out.push('\n');
    Ok(out)
}
