//! Core library for the chemistry chat assistant.
//!
//! Each module is kept small so that the boundaries between responsibilities
//! stay obvious:
//! - [`agents`] holds the model catalogue, settings, prompts, provider
//!   adapters, the HTTP transport and the mock catalogue.
//! - [`extraction`] turns model text into chemical structures and display text.
//! - [`suggestions`] derives follow-up prompts for each answer.
//! - [`model_manager`] is the façade the UI talks to.
//! - [`session`] carries the per-caller model selection.
//! - [`canvas`] hands structures to the host structure editor.
//! - [`errors`] keeps the error catalogue with human friendly metadata.
//! - [`logging`] emits structured diagnostics through the `log` facade.

pub mod agents;
pub mod canvas;
pub mod errors;
pub mod extraction;
pub mod logging;
pub mod model_manager;
pub mod session;
pub mod suggestions;

pub use canvas::{CanvasActivation, CanvasBridge, EditorSurface, ExchangeFormat, LoadCommand, LoadOptions};
pub use errors::{AssistError, CanvasError};
pub use extraction::{ChemicalStructure, StructureAction, StructureFormat};
pub use model_manager::{AssistResponse, ModelManager};
pub use session::ChatSession;
