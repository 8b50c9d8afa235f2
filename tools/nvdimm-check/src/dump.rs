//! # Captured Method-Result Dumps
//!
//! Plays back firmware responses recorded on a target machine. A dump is a
//! directory with one sub-directory per ACPI device node, named by its
//! namespace path (e.g. `_SB_.NVDR`). Each node holds one file per evaluated
//! method; the extension selects the object type:
//!
//! | File           | Meaning |
//! |----------------|---------|
//! | `<NAME>.buf`   | buffer, raw bytes |
//! | `<NAME>.int`   | integer, decimal or `0x` hex text |
//! | `<NAME>.str`   | string, verbatim except for one trailing line ending |
//! | `<NAME>.err`   | evaluation failed; the content is the error message |
//!
//! Any other `<NAME>.<ext>` file (e.g. a `.pkg` capture) records an object
//! that cannot be replayed and evaluates as [`InvocationError::Unrepresentable`].
//! A method without any file does not exist on the node.

use acpi_compliance::platform::{
    EnvironmentError, Invocation, InvocationError, LocateError, LocatedDevice,
};
use acpi_compliance::{DeviceLocator, Environment, MethodInvoker};
use acpi_method_abi::MethodResult;
use acpi_method_abi::eisa::EisaId;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: not an integer: {text:?}", path.display())]
    Integer { path: PathBuf, text: String },
    #[error("{}: not valid UTF-8", path.display())]
    Utf8 { path: PathBuf },
}

/// A recorded evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Result(MethodResult),
    Error(String),
    /// A recording in a format this platform cannot replay.
    Unsupported(PathBuf),
}

/// Device node inside a dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeHandle {
    dir: PathBuf,
}

/// [`Environment`], [`DeviceLocator`] and [`MethodInvoker`] over a dump directory.
#[derive(Debug)]
pub struct DumpPlatform {
    root: PathBuf,
    nodes: Vec<PathBuf>,
}

impl DumpPlatform {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            nodes: Vec::new(),
        }
    }

    fn scan(&self) -> Result<Vec<PathBuf>, DumpError> {
        let io_err = |source| DumpError::Io {
            path: self.root.clone(),
            source,
        };

        let mut nodes = Vec::new();
        for ent in fs::read_dir(&self.root).map_err(io_err)? {
            let ent = ent.map_err(io_err)?;
            if ent.file_type().map_err(io_err)?.is_dir() {
                nodes.push(ent.path());
            }
        }
        nodes.sort();
        Ok(nodes)
    }
}

impl Environment for DumpPlatform {
    fn acquire(&mut self) -> Result<(), EnvironmentError> {
        self.nodes = self
            .scan()
            .map_err(|e| EnvironmentError(e.to_string()))?;
        log::debug!(
            "{}: {} device nodes",
            self.root.display(),
            self.nodes.len()
        );
        Ok(())
    }

    fn release(&mut self) {
        self.nodes.clear();
    }
}

impl DeviceLocator for DumpPlatform {
    type Handle = NodeHandle;

    fn locate(&mut self, class_id: &str) -> Result<Option<LocatedDevice<NodeHandle>>, LocateError> {
        for dir in &self.nodes {
            let hid = match read_hid(dir) {
                Ok(Some(hid)) => hid,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("ignoring node: {e}");
                    continue;
                }
            };

            if hid == class_id {
                let path = dir
                    .file_name()
                    .map(|name| format!("\\{}", name.to_string_lossy()));
                return Ok(Some(LocatedDevice {
                    handle: NodeHandle { dir: dir.clone() },
                    path,
                }));
            }
        }
        Ok(None)
    }
}

impl MethodInvoker<NodeHandle> for DumpPlatform {
    fn invoke(&mut self, device: &NodeHandle, method: &str) -> Invocation {
        match read_recorded(&device.dir, method) {
            Ok(Some(Recorded::Result(result))) => Invocation::Returned(result),
            Ok(Some(Recorded::Error(message))) => {
                Invocation::Failed(InvocationError::Evaluation(message))
            }
            Ok(Some(Recorded::Unsupported(path))) => {
                log::debug!("{}: cannot replay recording", path.display());
                Invocation::Failed(InvocationError::Unrepresentable)
            }
            Ok(None) => Invocation::Absent,
            Err(e) => Invocation::Failed(InvocationError::Evaluation(e.to_string())),
        }
    }
}

/// `_HID` of a node as text; integer IDs are rendered as EISA IDs.
///
/// # Errors
/// Fails if a `_HID` file exists but cannot be read or parsed.
pub fn read_hid(dir: &Path) -> Result<Option<String>, DumpError> {
    Ok(match read_recorded(dir, "_HID")? {
        Some(Recorded::Result(MethodResult::String(s))) => Some(s),
        Some(Recorded::Result(MethodResult::Integer(n))) => {
            Some(EisaId::from_integer(n).to_string())
        }
        _ => None,
    })
}

/// Load the recorded evaluation of `method` in `dir`, if any.
///
/// # Errors
/// Fails if a recording exists but cannot be read or parsed.
pub fn read_recorded(dir: &Path, method: &str) -> Result<Option<Recorded>, DumpError> {
    let file = |ext: &str| dir.join(format!("{method}.{ext}"));

    if let Some(bytes) = read_optional(&file("buf"))? {
        return Ok(Some(Recorded::Result(MethodResult::Buffer(bytes))));
    }

    let int = file("int");
    if let Some(text) = read_trimmed(&int)? {
        let value = parse_integer(&text).ok_or(DumpError::Integer { path: int, text })?;
        return Ok(Some(Recorded::Result(MethodResult::Integer(value))));
    }

    if let Some(mut text) = read_text(&file("str"))? {
        strip_line_ending(&mut text);
        return Ok(Some(Recorded::Result(MethodResult::String(text))));
    }

    if let Some(text) = read_trimmed(&file("err"))? {
        return Ok(Some(Recorded::Error(text)));
    }

    Ok(find_other_recording(dir, method)?.map(Recorded::Unsupported))
}

/// First file in `dir` named `<method>.<ext>` with any other extension.
fn find_other_recording(dir: &Path, method: &str) -> Result<Option<PathBuf>, DumpError> {
    let io_err = |source| DumpError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut found = Vec::new();
    for ent in fs::read_dir(dir).map_err(io_err)? {
        let path = ent.map_err(io_err)?.path();
        if path.extension().is_some() && path.file_stem().is_some_and(|stem| stem == method) {
            found.push(path);
        }
    }
    found.sort();
    Ok(found.into_iter().next())
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, DumpError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(DumpError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn read_text(path: &Path) -> Result<Option<String>, DumpError> {
    let Some(bytes) = read_optional(path)? else {
        return Ok(None);
    };
    let text = String::from_utf8(bytes).map_err(|_| DumpError::Utf8 {
        path: path.to_path_buf(),
    })?;
    Ok(Some(text))
}

fn read_trimmed(path: &Path) -> Result<Option<String>, DumpError> {
    Ok(read_text(path)?.map(|text| text.trim().to_string()))
}

/// Drop a single trailing `\n` or `\r\n` left by the capture tool.
fn strip_line_ending(text: &mut String) {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
}

fn parse_integer(text: &str) -> Option<u64> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}
