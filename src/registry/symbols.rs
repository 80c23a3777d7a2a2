//! Reading the symbol table of an executable.
//!
//! The dump tool (`nm` by default) prints one symbol per line:
//!
//! ```text
//! 0000000000057e40 T topotest_anchor
//!                  U memcpy@GLIBC_2.14
//! ```
//!
//! Defined symbols start with a hexadecimal address, undefined ones with
//! whitespace. After the address follows a single kind character and then the
//! name, which may carry one leading underscore on platforms that prefix C
//! symbols.

use std::{
    path::Path,
    process::{Command, Stdio},
};

use crate::error::DiscoveryError;

/// Names longer than this are cut off.
pub const MAX_SYMBOL_NAME_LEN: usize = 254;

/// Longest executable path handed to the dump tool, in bytes.
pub const MAX_PATH_LEN: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    /// Link time address, absent for undefined symbols.
    pub address: Option<usize>,
    pub kind: char,
    pub name: String,
}

/// Run `tool` against `path` and parse its output.
pub fn read_symbols(path: &Path, tool: &str) -> Result<Vec<SymbolRecord>, DiscoveryError> {
    let len = path.as_os_str().len();
    if len > MAX_PATH_LEN {
        return Err(DiscoveryError::PathTooLong {
            path: path.to_path_buf(),
            len,
            limit: MAX_PATH_LEN,
        });
    }

    tracing::debug!(tool, path = %path.display(), "dumping symbol table");
    let output = Command::new(tool)
        .arg(path)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|source| DiscoveryError::Spawn {
            tool: tool.to_owned(),
            source,
        })?;

    if !output.status.success() {
        return Err(DiscoveryError::ToolFailed {
            tool: tool.to_owned(),
            status: output.status,
        });
    }

    let records = parse_symbol_dump(&String::from_utf8_lossy(&output.stdout));
    tracing::debug!(symbols = records.len(), "parsed symbol table");
    Ok(records)
}

/// Parse a symbol dump.
///
/// Parsing stops at the end of input or at the first empty line.
pub fn parse_symbol_dump(dump: &str) -> Vec<SymbolRecord> {
    dump.lines()
        .map(|line| line.trim_end_matches('\r'))
        .take_while(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> SymbolRecord {
    let (address, rest) = match line.starts_with(char::is_whitespace) {
        true => (None, line),
        false => {
            let digits = line
                .find(|c: char| !c.is_ascii_hexdigit())
                .unwrap_or(line.len());
            let (hex, rest) = line.split_at(digits);
            (parse_address(hex), rest)
        }
    };

    let rest = rest.trim_start();
    let mut chars = rest.chars();
    let kind = chars.next().unwrap_or('\0');

    let name = chars.as_str().trim_start();
    let name = name.strip_prefix('_').unwrap_or(name);
    let name = name.chars().take(MAX_SYMBOL_NAME_LEN).collect();

    SymbolRecord {
        address,
        kind,
        name,
    }
}

fn parse_address(hex: &str) -> Option<usize> {
    match hex.is_empty() {
        true => Some(0),
        false => usize::from_str_radix(hex, 16).ok(),
    }
}
