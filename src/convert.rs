//! The parse → export pipeline.

use termweave_schema::Diagnostics;

use crate::adapter::{ConvertError, ExportOutcome, ParseOutcome, Registry};

/// Result of a full conversion: native text for the destination terminal
/// plus every warning gathered along the way.
#[derive(Debug)]
pub struct ConvertOutcome {
    pub text: String,
    pub diagnostics: Diagnostics,
}

/// Convert configuration text from one terminal's format to another's.
///
/// Both terminal names must be registered or the conversion aborts with
/// [`ConvertError::UnknownTerminal`] before any text is touched. Settings
/// captured into the terminal-specific bucket replay only when the
/// destination is the terminal that owns them; foreign entries are
/// dropped with a diagnostic each.
pub fn convert(
    registry: &Registry,
    from: &str,
    to: &str,
    source: &str,
) -> Result<ConvertOutcome, ConvertError> {
    let from_adapter = registry.get(from)?;
    let to_adapter = registry.get(to)?;
    log::debug!("converting {from} -> {to} ({} bytes)", source.len());

    let ParseOutcome {
        schema,
        mut diagnostics,
    } = from_adapter.parse(source)?;

    for setting in schema.foreign_terminal_specific(to_adapter.name()) {
        diagnostics.warn(format!(
            "dropping {} setting `{}`: no equivalent in {}",
            setting.terminal, setting.key, to
        ));
    }

    let ExportOutcome {
        text,
        diagnostics: export_diagnostics,
    } = to_adapter.export(&schema)?;
    diagnostics.extend(export_diagnostics);

    Ok(ConvertOutcome { text, diagnostics })
}
