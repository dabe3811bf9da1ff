//! Native file and message dialogs.
//!
//! Every dialog is modal and blocks the UI thread until dismissed.

use inkslate_core::{FileKind, SaveFormat, WhiteboardError};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;

/// Ask for a file of `kind`. `None` when the user cancels.
pub fn pick_file(kind: FileKind) -> Option<PathBuf> {
    FileDialog::new()
        .set_title(kind.dialog_title())
        .add_filter(kind.filter_name(), kind.extensions())
        .pick_file()
}

/// Ask where to save the canvas.
pub fn pick_save_path() -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save Image")
        .set_file_name(format!("whiteboard.{}", SaveFormat::default().extension()));
    for format in SaveFormat::ALL {
        dialog = dialog.add_filter(format.filter_description(), &[format.extension()]);
    }
    dialog.save_file()
}

/// Log `err` and, when it concerns the user, show it in an error box.
pub fn report(err: &WhiteboardError) {
    if !err.is_user_visible() {
        log::warn!("{err}");
        return;
    }
    log::error!("{err}");
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(err.title())
        .set_description(err.to_string())
        .set_buttons(MessageButtons::Ok)
        .show();
}
