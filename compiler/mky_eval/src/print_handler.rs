//! Where `echo` output goes.
//!
//! Programs print to stdout; tests capture into a buffer; the silent handler
//! discards everything. Enum dispatch, no trait objects.

use std::sync::Arc;

use parking_lot::Mutex;

/// Destination for `echo` lines.
pub enum PrintHandlerImpl {
    /// Standard output; what the CLI uses.
    Stdout,
    /// Accumulates lines for later inspection.
    Buffer(Mutex<String>),
    /// Drops every line.
    Silent,
}

impl PrintHandlerImpl {
    /// Emit `msg` followed by a newline.
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout => println!("{msg}"),
            Self::Buffer(buffer) => {
                let mut buf = buffer.lock();
                buf.push_str(msg);
                buf.push('\n');
            }
            Self::Silent => {}
        }
    }

    /// Captured output. Empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(buffer) = self {
            buffer.lock().clear();
        }
    }
}

/// Handle shared between the interpreter and whoever reads the output.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout)
}

/// Handler whose lines can be read back with [`PrintHandlerImpl::get_output`].
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}
