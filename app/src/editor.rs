//! Editor surface for headless use. Every command the bridge sends is
//! recorded; in echo mode it is also written to stdout as one JSON line.

use std::io::{self, Write};
use std::sync::Mutex;

use chemassist_core::{CanvasError, EditorSurface, ExchangeFormat, LoadCommand, LoadOptions};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    CopyPrime,
    Load {
        data: String,
        fragment: bool,
        input_format: &'static str,
    },
}

#[derive(Debug, Default)]
pub struct JsonLinesEditor {
    echo: bool,
    commands: Mutex<Vec<EditorCommand>>,
}

impl JsonLinesEditor {
    pub fn echoing() -> Self {
        Self {
            echo: true,
            commands: Mutex::default(),
        }
    }

    pub fn recording() -> Self {
        Self::default()
    }

    pub fn take_commands(&self) -> Vec<EditorCommand> {
        self.commands
            .lock()
            .map(|mut commands| std::mem::take(&mut *commands))
            .unwrap_or_default()
    }

    fn emit(&self, command: EditorCommand) -> Result<(), CanvasError> {
        if self.echo {
            let encoded = serde_json::to_string(&command)
                .map_err(|err| CanvasError::Command(err.to_string()))?;
            let mut out = io::stdout().lock();
            writeln!(out, "{encoded}").map_err(|err| CanvasError::Command(err.to_string()))?;
        }
        self.commands
            .lock()
            .map_err(|_| CanvasError::Command("editor command log poisoned".into()))?
            .push(command);
        Ok(())
    }
}

impl EditorSurface for JsonLinesEditor {
    fn copy_prime(&self) -> Result<(), CanvasError> {
        self.emit(EditorCommand::CopyPrime)
    }

    fn load(&self, data: &str, options: LoadOptions) -> Result<LoadCommand, CanvasError> {
        if data.trim().is_empty() {
            return Err(CanvasError::Command("empty structure data".into()));
        }
        Ok(LoadCommand {
            data: data.to_string(),
            options,
        })
    }

    fn dispatch(&self, command: LoadCommand) -> Result<(), CanvasError> {
        self.emit(EditorCommand::Load {
            data: command.data,
            fragment: command.options.fragment,
            input_format: command.options.input_format,
        })
    }

    // There is no canvas to read back from a pipe.
    fn exchange_format(&self) -> ExchangeFormat {
        ExchangeFormat::Unavailable
    }
}

#[cfg(test)]
mod tests {
    use chemassist_core::{CanvasBridge, ChemicalStructure};

    use super::*;

    #[test]
    fn recording_editor_keeps_commands_in_order() {
        let bridge = CanvasBridge::new(JsonLinesEditor::recording());
        let outcome = bridge.add_structures_to_canvas(&[
            ChemicalStructure::smiles("CCO", "エタノール"),
            ChemicalStructure::smiles("  ", "空"),
        ]);
        assert!(outcome.success);
        assert_eq!(outcome.added_structures, 1);
        assert_eq!(
            bridge.editor().take_commands(),
            vec![
                EditorCommand::CopyPrime,
                EditorCommand::Load {
                    data: "CCO".into(),
                    fragment: true,
                    input_format: "chemical/x-daylight-smiles",
                },
                EditorCommand::CopyPrime,
            ]
        );
        assert!(bridge.editor().take_commands().is_empty());
    }
}
