use std::sync::Arc;

use anyhow::Result;
use chemassist_core::{AssistResponse, CanvasActivation, CanvasBridge, ModelManager};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::editor::{EditorCommand, JsonLinesEditor};

#[derive(Debug, Subcommand, Clone)]
pub enum AssistCommand {
    /// Generate a structure from a compound name or description.
    Generate(GenerateArgs),
    /// Analyze a structure given as SMILES.
    Analyze {
        structure: String,
        #[arg(long)]
        question: Option<String>,
    },
    /// Ask a general chemistry question.
    Ask {
        question: String,
        #[arg(long)]
        context: Option<String>,
    },
    /// Predict the products of a reaction.
    React {
        #[arg(required = true)]
        reactants: Vec<String>,
        #[arg(long)]
        conditions: Option<String>,
    },
}

#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    prompt: String,
    /// Hand extracted structures to the editor surface on stdout.
    #[arg(long)]
    to_canvas: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    response: &'a AssistResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    canvas: Option<&'a CanvasActivation>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    editor_commands: &'a [EditorCommand],
}

/// Runs one assistant operation and prints it. Returns whether the response
/// was a success.
pub async fn run(
    manager: Arc<ModelManager>,
    model: Option<&str>,
    command: AssistCommand,
    json: bool,
) -> Result<bool> {
    let mut session = manager.session();
    if let Some(id) = model {
        manager.registry().get(id)?;
        session.switch_model(manager.registry(), id);
    }

    let mut to_canvas = false;
    let response = match command {
        AssistCommand::Generate(args) => {
            to_canvas = args.to_canvas;
            manager.generate_structure(&session, &args.prompt).await
        }
        AssistCommand::Analyze {
            structure,
            question,
        } => {
            manager
                .analyze_structure(&session, &structure, question.as_deref())
                .await
        }
        AssistCommand::Ask { question, context } => {
            manager
                .ask_question(&session, &question, context.as_deref())
                .await
        }
        AssistCommand::React {
            reactants,
            conditions,
        } => {
            manager
                .predict_reaction(&session, &reactants, conditions.as_deref())
                .await
        }
    };

    // In JSON mode editor commands go into the report so stdout stays one
    // document.
    let mut editor_commands = Vec::new();
    let canvas = if to_canvas && response.success {
        let editor = if json {
            JsonLinesEditor::recording()
        } else {
            JsonLinesEditor::echoing()
        };
        let bridge = CanvasBridge::new(editor);
        let activation = bridge.add_structures_to_canvas(&response.structures);
        editor_commands = bridge.editor().take_commands();
        Some(activation)
    } else {
        None
    };

    if json {
        let report = Report {
            response: &response,
            canvas: canvas.as_ref(),
            editor_commands: &editor_commands,
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        print_human(&response, canvas.as_ref());
    }

    if let Some(error) = &response.error {
        eprintln!("error: {error}");
    }
    Ok(response.success)
}

fn print_human(response: &AssistResponse, canvas: Option<&CanvasActivation>) {
    println!("{}", response.message);
    if !response.structures.is_empty() {
        println!();
        for structure in &response.structures {
            println!("  [{}] {}: {}", structure.format, structure.label_or_data(), structure.data);
        }
    }
    if let Some(activation) = canvas {
        match &activation.error {
            Some(error) => println!("canvas: {error}"),
            None => println!("canvas: {} structure(s) added", activation.added_structures),
        }
    }
    if !response.suggestions.is_empty() {
        println!();
        for suggestion in &response.suggestions {
            println!("  > {suggestion}");
        }
    }
}
