//! Input and output files for a conversion.
//!
//! `-` stands for stdin on the input side and stdout on the output side. Existing
//! output files are only replaced as far as the [`OverwritePolicy`] allows.

use relit_config::OverwritePolicy;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::SystemTime;

/// Name standing for stdin or stdout.
pub const STDIO: &str = "-";

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("no input file given (use '-' for stdin)")]
    MissingInput,

    #[error("output file '{0}' exists, use --overwrite=yes to replace it")]
    OutputExists(String),

    #[error("output file '{outfile}' is newer than input file '{infile}', use --overwrite=yes to replace it")]
    OutputNewer { outfile: String, infile: String },

    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Read the whole input, from stdin for `-`.
pub fn read_input(path: &str) -> Result<String, StreamError> {
    let read_error = |source| StreamError::Read {
        path: path.to_string(),
        source,
    };
    if path == STDIO {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(read_error)?;
        return Ok(text);
    }
    fs::read_to_string(path).map_err(read_error)
}

/// Refuse to clobber `outfile` when the policy forbids it.
pub fn check_overwrite(
    infile: &str,
    outfile: &str,
    policy: OverwritePolicy,
) -> Result<(), StreamError> {
    if outfile == STDIO || !Path::new(outfile).exists() {
        return Ok(());
    }
    match policy {
        OverwritePolicy::Yes => Ok(()),
        OverwritePolicy::No => Err(StreamError::OutputExists(outfile.to_string())),
        OverwritePolicy::Update if is_newer(outfile, infile) => Err(StreamError::OutputNewer {
            outfile: outfile.to_string(),
            infile: infile.to_string(),
        }),
        OverwritePolicy::Update => Ok(()),
    }
}

/// `path` was modified strictly later than `other`.
///
/// False when either file has no readable modification time (stdin included).
pub fn is_newer(path: &str, other: &str) -> bool {
    match (modified(path), modified(other)) {
        (Some(a), Some(b)) => a > b,
        _ => false,
    }
}

fn modified(path: &str) -> Option<SystemTime> {
    if path == STDIO {
        return None;
    }
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

/// Write the converted text, to stdout for `-`.
pub fn write_output(path: &str, text: &str) -> Result<(), StreamError> {
    let write_error = |source| StreamError::Write {
        path: path.to_string(),
        source,
    };
    if path == STDIO {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes()).map_err(write_error)?;
        return stdout.flush().map_err(write_error);
    }
    fs::write(path, text).map_err(write_error)
}

/// Settle the files after a successful file-to-file conversion.
///
/// With `replace` the input is renamed to `<infile>~`. Otherwise the output
/// takes the input's modification time, so that `update` treats the pair as in
/// sync.
pub fn finish(infile: &str, outfile: &str, replace: bool) -> Result<(), StreamError> {
    if infile == STDIO || outfile == STDIO {
        return Ok(());
    }
    if replace {
        let backup = format!("{infile}~");
        log::info!("renaming {infile} to {backup}");
        return fs::rename(infile, &backup).map_err(|source| StreamError::Write {
            path: backup,
            source,
        });
    }
    let Some(mtime) = modified(infile) else {
        return Ok(());
    };
    let write_error = |source| StreamError::Write {
        path: outfile.to_string(),
        source,
    };
    let file = File::options()
        .write(true)
        .open(outfile)
        .map_err(write_error)?;
    file.set_modified(mtime).map_err(write_error)
}
