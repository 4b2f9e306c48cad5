//! Debug log shared by the UI thread and the API worker. The TUI owns
//! stdout, so diagnostics go to `classfi_debug.log` under the data dir.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
}

pub fn log_path() -> PathBuf {
    crate::utils::data_dir().join("classfi_debug.log")
}

/// Open the log file for appending. Safe to call more than once; only the
/// first call opens the file. A failure to open leaves logging disabled
/// rather than stopping the app.
pub fn init() {
    let mut file = LOG_FILE.lock().unwrap();
    if file.is_some() {
        return;
    }
    let path = log_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    if let Ok(opened) = OpenOptions::new().create(true).append(true).open(&path) {
        *file = Some(opened);
    }
}

pub fn log(message: &str) {
    if let Some(file) = LOG_FILE.lock().unwrap().as_mut() {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let _ = writeln!(file, "[{}] {}", timestamp, message);
    }
}
