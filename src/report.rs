use std::{
    fmt::Display,
    io::{self, Write},
};

/// Label printed in front of the value, kept exactly as the lesson prints it.
pub const REPORT_LABEL: &str = "The of px is : ";

pub fn format_report<V: Display>(value: V) -> String {
    format!("{REPORT_LABEL}{value}")
}

/**
 * Emit the report line, no trailing newline is written
 */
pub fn report<W: Write, V: Display>(out: &mut W, value: V) -> io::Result<()> {
    out.write_all(format_report(value).as_bytes())?;
    out.flush()
}
