/*
 * This module is responsible for defining the static parts of the UI that the
 * application logic hands to the platform: the content of the About dialog
 * and, through `theme`, the application-wide stylesheet.
 */
pub mod theme;

use crate::core::{APP_DISPLAY_NAME, APP_ID, APP_VERSION};
use crate::platform_layer::AboutInfo;

pub const DEVELOPER_NAME: &str = "Lorenzo Paderi";
pub const ISSUE_URL: &str = "https://github.com/mijorus/gearlever";

pub fn describe_about_dialog() -> AboutInfo {
    log::debug!("ui_description_layer: describe_about_dialog called.");
    AboutInfo {
        application_name: APP_DISPLAY_NAME.to_string(),
        version: APP_VERSION.to_string(),
        developers: vec![DEVELOPER_NAME.to_string()],
        copyright: format!("2023 {DEVELOPER_NAME}"),
        application_icon: APP_ID.to_string(),
        issue_url: ISSUE_URL.to_string(),
    }
}
