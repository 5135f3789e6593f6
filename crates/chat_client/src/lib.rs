//! Client for a retrieval chat endpoint (UI hydration, guarded submissions,
//! animated placeholder). Used by the `chat-client` binary.

pub mod client;
pub mod controller;
pub mod hydrate;
pub mod messages;
pub mod settings;
pub mod transcript;
pub mod view;

pub use client::{ChatClient, ClientError};
pub use controller::{ChatController, FailurePolicy, Submission};
pub use hydrate::{apply_config, hydrate};
pub use messages::UiConfig;
pub use settings::{Settings, SettingsError};
pub use transcript::{Exchange, Transcript};
pub use view::{MemoryView, Page, TerminalView, View};
