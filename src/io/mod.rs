// Purpose - external interfaces: audio output and keyboard layout

pub mod device;
pub mod keymap;

pub use device::{open_output, OutputStream};
pub use keymap::{KeyMap, NoteTemplate};
