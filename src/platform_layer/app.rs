use super::command_executor::{self, HeadlessState};
use super::error::Result as PlatformResult;
use super::types::{AppEvent, PlatformEventHandler};

use std::io::BufRead;
use std::path::PathBuf;

/*
 * A request read from the platform's input stream. Most map straight to an
 * `AppEvent`; closing the window is a platform-side action that produces a
 * `WindowClosed` event only if a window is live.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlatformRequest {
    Event(AppEvent),
    CloseMainWindow,
}

/*
 * Parses one line of the request stream: `activate`, `open <path>`,
 * `action <name>`, `close` or `quit`. Returns `None` for anything else,
 * including blank lines. Everything after `open ` is one path, spaces included.
 */
pub(crate) fn parse_request(line: &str) -> Option<PlatformRequest> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    match verb {
        "activate" => Some(PlatformRequest::Event(AppEvent::Activate)),
        "open" => Some(PlatformRequest::Event(AppEvent::OpenFiles {
            files: if rest.is_empty() {
                Vec::new()
            } else {
                vec![resolve_path(rest)]
            },
            hint: String::new(),
        })),
        "action" => {
            let name = rest.split_whitespace().next()?;
            Some(PlatformRequest::Event(AppEvent::ActionInvoked {
                name: name.to_string(),
            }))
        }
        "close" => Some(PlatformRequest::CloseMainWindow),
        "quit" => Some(PlatformRequest::Event(AppEvent::QuitRequested)),
        _ => None,
    }
}

// Relative paths are taken relative to the working directory, like the toolkit does.
fn resolve_path(arg: &str) -> PathBuf {
    std::path::absolute(arg).unwrap_or_else(|_| PathBuf::from(arg))
}

// Positional arguments after the program name; anything starting with '-' is a toolkit flag.
pub(crate) fn files_from_args(args: &[String]) -> Vec<PathBuf> {
    args.iter()
        .skip(1)
        .filter(|arg| !arg.starts_with('-'))
        .map(|arg| resolve_path(arg))
        .collect()
}

/// The primary interface to the platform abstraction layer.
///
/// Stands in for the toolkit's application object: it raises the lifecycle
/// events, drains the handler's command queue after each one and keeps the
/// resulting window/action bookkeeping in a `HeadlessState`.
pub struct PlatformInterface {
    state: HeadlessState,
}

impl PlatformInterface {
    pub fn new() -> Self {
        PlatformInterface {
            state: HeadlessState::default(),
        }
    }

    /*
     * Runs the application. Sends `Startup`, then `OpenFiles` with the
     * positional arguments if there are any and `Activate` otherwise, then
     * serves requests from `input` until it ends or the application quits.
     * A fatal error from the handler ends the loop and is returned.
     */
    pub fn run<R: BufRead>(
        &mut self,
        handler: &mut dyn PlatformEventHandler,
        args: &[String],
        input: R,
    ) -> PlatformResult<()> {
        log::debug!("Platform: Starting with arguments {args:?}");
        self.dispatch(handler, AppEvent::Startup)?;

        let files = files_from_args(args);
        let first_event = if files.is_empty() {
            AppEvent::Activate
        } else {
            AppEvent::OpenFiles {
                files,
                hint: String::new(),
            }
        };
        self.dispatch(handler, first_event)?;

        if !self.state.quit_requested {
            for line in input.lines() {
                let line = line?;
                match parse_request(&line) {
                    Some(PlatformRequest::Event(event)) => self.dispatch(handler, event)?,
                    Some(PlatformRequest::CloseMainWindow) => self.close_main_window(handler)?,
                    None if line.trim().is_empty() => {}
                    None => log::warn!("Platform: Ignoring unknown request '{}'", line.trim()),
                }
                // Stop before the next read; an interactive stream would block on it.
                if self.state.quit_requested {
                    break;
                }
            }
        }

        log::debug!("Platform: Loop finished, notifying handler.");
        handler.on_quit();
        Ok(())
    }

    fn dispatch(
        &mut self,
        handler: &mut dyn PlatformEventHandler,
        event: AppEvent,
    ) -> PlatformResult<()> {
        if let AppEvent::ActionInvoked { name } = &event {
            if !self.state.is_action_registered(name) {
                log::warn!("Platform: Action 'app.{name}' is not registered, ignoring.");
                return Ok(());
            }
        }
        log::trace!("Platform: Dispatching {event:?}");
        handler.handle_event(event)?;
        self.process_commands(handler);
        Ok(())
    }

    fn process_commands(&mut self, handler: &mut dyn PlatformEventHandler) {
        while let Some(command) = handler.try_dequeue_command() {
            if let Err(e) = command_executor::execute_command(&mut self.state, command) {
                log::error!("Platform: Error executing command: {e}");
            }
        }
    }

    fn close_main_window(&mut self, handler: &mut dyn PlatformEventHandler) -> PlatformResult<()> {
        match self.state.main_window() {
            Some(window_id) => {
                command_executor::close_window(&mut self.state, window_id);
                self.dispatch(handler, AppEvent::WindowClosed { window_id })
            }
            None => {
                log::debug!("Platform: No window to close.");
                Ok(())
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &HeadlessState {
        &self.state
    }
}

impl Default for PlatformInterface {
    fn default() -> Self {
        Self::new()
    }
}
