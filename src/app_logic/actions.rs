/*
 * Named, parameterless application actions. The registry maps an action name
 * to the semantic `AppAction` the controller dispatches on, together with its
 * keyboard accelerators. Registering produces the `RegisterAction` command
 * that exposes the action on the platform side.
 */
use crate::platform_layer::PlatformCommand;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppAction {
    About,
    Preferences,
    OpenLogFile,
}

impl AppAction {
    pub fn name(self) -> &'static str {
        match self {
            AppAction::About => "about",
            AppAction::Preferences => "preferences",
            AppAction::OpenLogFile => "open_log_file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBinding {
    pub action: AppAction,
    pub accelerators: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ActionRegistry {
    bindings: HashMap<String, ActionBinding>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        ActionRegistry {
            bindings: HashMap::new(),
        }
    }

    /*
     * Binds `name` to `action`. A second registration under the same name
     * replaces the first one, accelerators included.
     */
    pub fn register(
        &mut self,
        name: &str,
        action: AppAction,
        accelerators: &[&str],
    ) -> PlatformCommand {
        let accelerators: Vec<String> = accelerators.iter().map(|a| a.to_string()).collect();
        let previous = self.bindings.insert(
            name.to_string(),
            ActionBinding {
                action,
                accelerators: accelerators.clone(),
            },
        );
        if let Some(previous) = previous {
            log::debug!(
                "ActionRegistry: Replaced binding for '{name}' (was {:?} with accelerators {:?})",
                previous.action,
                previous.accelerators
            );
        }
        PlatformCommand::RegisterAction {
            name: name.to_string(),
            accelerators,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<AppAction> {
        self.bindings.get(name).map(|binding| binding.action)
    }
}

#[cfg(test)]
impl ActionRegistry {
    pub fn binding(&self, name: &str) -> Option<&ActionBinding> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}
