//! Form field value objects

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Metadata of a file picked for upload. The contents are never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name as shown to the user
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
    /// Lower-cased extension without the dot, empty if the name has none
    pub extension: String,
}

impl UploadedFile {
    /// Build the upload metadata for a file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to read metadata for {}", path.display()))?;
        if !metadata.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = extension_of(&name);
        let mime_type = mime_for_extension(&extension).to_string();

        Ok(Self {
            name,
            byte_size: metadata.len(),
            mime_type,
            extension,
        })
    }
}

/// Text after the last dot, lower-cased. A name without a dot has no extension.
fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Media type guessed from the extension
fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(Option<UploadedFile>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Get the text value (returns empty string for file fields)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::File(_) => "",
        }
    }

    /// Get the uploaded file, if any
    pub fn as_file(&self) -> Option<&UploadedFile> {
        match self {
            FieldValue::File(f) => f.as_ref(),
            FieldValue::Text(_) => None,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::File(Some(f)) => format!("{} ({} bytes)", f.name, f.byte_size),
            FieldValue::File(None) => String::new(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<UploadedFile> for FieldValue {
    fn from(value: UploadedFile) -> Self {
        FieldValue::File(Some(value))
    }
}

/// Static description of one field of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

/// How a field is entered and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Rendered masked
    Secret,
    Multiline,
    /// Plain text with a fixed starting value
    Choice(&'static str),
    File,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
        }
    }

    pub const fn secret(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Secret,
        }
    }

    pub const fn multiline(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Multiline,
        }
    }

    pub const fn choice(name: &'static str, label: &'static str, initial: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Choice(initial),
        }
    }

    pub const fn file(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::File,
        }
    }

    /// Value a fresh or reset form holds for this field
    pub fn initial_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Choice(initial) => FieldValue::Text(initial.to_string()),
            FieldKind::File => FieldValue::File(None),
            FieldKind::Text | FieldKind::Secret | FieldKind::Multiline => {
                FieldValue::Text(String::new())
            }
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, FieldKind::Multiline)
    }

    pub fn is_secret(&self) -> bool {
        matches!(self.kind, FieldKind::Secret)
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, FieldKind::File)
    }
}
