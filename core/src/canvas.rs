//! Hands accepted structures to the host editor by replaying its paste
//! gesture: prime the clipboard, then load the structure as a fragment. The
//! editor arms a placement tool and waits for the user's next pointer action;
//! that wait belongs to the editor and is not modelled here.

use futures::future::BoxFuture;
use log::Level;
use serde::Serialize;
use serde_json::json;

use crate::errors::CanvasError;
use crate::extraction::ChemicalStructure;
use crate::logging::log_event;

pub const SMILES_MIME: &str = "chemical/x-daylight-smiles";

/// Map a structure format tag to the editor's exchange-format identifier.
/// Unknown tags load as SMILES.
pub fn exchange_format_id(tag: &str) -> &'static str {
    match tag.trim().to_ascii_lowercase().as_str() {
        "smiles" => SMILES_MIME,
        "mol" | "molfile" => "chemical/x-mdl-molfile",
        "sdf" => "chemical/x-mdl-sdfile",
        "rxn" => "chemical/x-mdl-rxnfile",
        "ket" => "chemical/x-indigo-ket",
        "cml" => "chemical/x-cml",
        "inchi" => "chemical/x-inchi",
        _ => SMILES_MIME,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadOptions {
    pub fragment: bool,
    pub input_format: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadCommand {
    pub data: String,
    pub options: LoadOptions,
}

/// Result of the editor's "read current canvas" accessor.
pub enum ExchangeFormat {
    Ready(String),
    Pending(BoxFuture<'static, Result<String, CanvasError>>),
    Unavailable,
}

/// Command surface of the host structure editor.
pub trait EditorSurface {
    fn copy_prime(&self) -> Result<(), CanvasError>;
    fn load(&self, data: &str, options: LoadOptions) -> Result<LoadCommand, CanvasError>;
    fn dispatch(&self, command: LoadCommand) -> Result<(), CanvasError>;
    fn exchange_format(&self) -> ExchangeFormat;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanvasActivation {
    pub success: bool,
    pub added_structures: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct CanvasBridge<E> {
    editor: E,
}

impl<E: EditorSurface> CanvasBridge<E> {
    pub fn new(editor: E) -> Self {
        Self { editor }
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Activate each structure in turn. A failing structure is counted and
    /// skipped; structures already placed are never rolled back.
    pub fn add_structures_to_canvas(&self, structures: &[ChemicalStructure]) -> CanvasActivation {
        let mut added = 0;
        let mut last_error = None;

        for (index, structure) in structures.iter().enumerate() {
            match self.activate(structure) {
                Ok(()) => added += 1,
                Err(err) => {
                    log_event(
                        Level::Warn,
                        Some(err.code()),
                        "canvas.bridge",
                        "Structure activation failed",
                        Some("Continuing with the remaining structures"),
                        Some(json!({
                            "index": index,
                            "label": structure.label,
                            "error": err.to_string(),
                        })),
                    );
                    last_error = Some(err);
                }
            }
        }

        if structures.is_empty() || added > 0 {
            log_event(
                Level::Info,
                Some("CNV-0100"),
                "canvas.bridge",
                "Structures handed to editor",
                None,
                Some(json!({ "requested": structures.len(), "added": added })),
            );
            return CanvasActivation {
                success: true,
                added_structures: added,
                error: None,
            };
        }

        let reason = last_error
            .map(|err| err.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        log_event(
            Level::Error,
            Some("CNV-0101"),
            "canvas.bridge",
            "No structure reached the editor",
            None,
            Some(json!({ "requested": structures.len(), "error": reason })),
        );
        CanvasActivation {
            success: false,
            added_structures: 0,
            error: Some(format!("No structures could be added to the canvas: {reason}")),
        }
    }

    fn activate(&self, structure: &ChemicalStructure) -> Result<(), CanvasError> {
        self.editor.copy_prime()?;
        let options = LoadOptions {
            fragment: true,
            input_format: exchange_format_id(structure.format.as_str()),
        };
        let command = self.editor.load(&structure.data, options)?;
        self.editor.dispatch(command)
    }

    /// Synchronous best-effort read. An editor whose accessor is asynchronous
    /// reports nothing here; use [`Self::current_structure_as_ket`] instead.
    pub fn try_current_structure_as_ket(&self) -> Option<String> {
        match self.editor.exchange_format() {
            ExchangeFormat::Ready(ket) => Some(ket),
            ExchangeFormat::Pending(_) | ExchangeFormat::Unavailable => None,
        }
    }

    pub async fn current_structure_as_ket(&self) -> Result<Option<String>, CanvasError> {
        match self.editor.exchange_format() {
            ExchangeFormat::Ready(ket) => Ok(Some(ket)),
            ExchangeFormat::Pending(read) => read.await.map(Some),
            ExchangeFormat::Unavailable => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_tags_map_to_exchange_ids() {
        assert_eq!(exchange_format_id("smiles"), SMILES_MIME);
        assert_eq!(exchange_format_id("molfile"), "chemical/x-mdl-molfile");
        assert_eq!(exchange_format_id("MOL"), "chemical/x-mdl-molfile");
        assert_eq!(exchange_format_id("sdf"), "chemical/x-mdl-sdfile");
        assert_eq!(exchange_format_id("rxn"), "chemical/x-mdl-rxnfile");
        assert_eq!(exchange_format_id("ket"), "chemical/x-indigo-ket");
        assert_eq!(exchange_format_id("cml"), "chemical/x-cml");
        assert_eq!(exchange_format_id("inchi"), "chemical/x-inchi");
        assert_eq!(exchange_format_id("pdb"), SMILES_MIME);
    }
}
