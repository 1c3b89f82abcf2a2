use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a response in the requested format. `lines` is the text rendering.
pub fn render<T: Serialize>(
    value: &T,
    lines: &[String],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(lines.join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response in the requested format.
pub fn output<T: Serialize>(
    value: &T,
    lines: &[String],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rendered = render(value, lines, format)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}
