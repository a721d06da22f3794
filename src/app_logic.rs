/*
 * This module provides the application logic layer, centered around
 * `ApplicationController`, which reacts to lifecycle events from the platform
 * layer and answers with `PlatformCommand`s. Window ownership, action
 * dispatch and file routing live in their own submodules. Unit tests for the
 * controller are in `controller_tests.rs`.
 */
pub mod actions;
pub mod controller;
pub mod file_open;
pub mod window_lifecycle;


pub use controller::ApplicationController;
