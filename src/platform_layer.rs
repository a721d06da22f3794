/*
 * The boundary to the GUI toolkit. The application logic only sees the types
 * re-exported here: it receives `AppEvent`s through `PlatformEventHandler` and
 * answers with queued `PlatformCommand`s. `PlatformInterface` is the headless
 * driver that raises the events and executes the commands.
 */
pub mod app;
pub(crate) mod command_executor;
pub mod error;
pub mod types;

#[cfg(test)]
mod command_executor_tests;

pub use app::PlatformInterface;
pub use error::{PlatformError, Result as PlatformResult};
pub use types::{AboutInfo, AppEvent, PlatformCommand, PlatformEventHandler, WindowId};
