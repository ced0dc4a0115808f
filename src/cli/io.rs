//! Input and output for commands: a file when given, stdin/stdout otherwise.

use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::cli::output;
use crate::error::Result;

/// Read all of `path`, or stdin when `None`.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    let bytes = match path {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().lock().read_to_end(&mut buf)?;
            buf
        }
    };
    debug!(bytes = bytes.len(), "read input");
    Ok(bytes)
}

/// Read a UTF-8 document from `path`, or stdin when `None`.
pub fn read_document(path: Option<&Path>) -> Result<String> {
    let bytes = read_input(path)?;
    String::from_utf8(bytes).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("input is not valid UTF-8: {}", e.utf8_error()),
        )
        .into()
    })
}

/// Write `data` to `path`, or stdout when `None`.
pub fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, data)?;
            output::success(&format!("wrote {}", path.display()));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
        }
    }
    debug!(bytes = data.len(), "wrote output");
    Ok(())
}
