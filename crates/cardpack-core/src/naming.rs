use crate::config::NamingMode;
use crate::model::NamingRecord;
use std::path::Path;

/// Sanitizes a source file name into an output texture file name: strips the
/// extension, replaces spaces with underscores, drops every character that is
/// not a word character or hyphen, lowercases, and appends `.png`.
///
/// Idempotent on already-sanitized names. Collisions between distinct sources
/// silently overwrite; that is accepted behavior.
pub fn sanitize_file_name(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => file_name,
    };
    let clean: String = stem
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    format!("{clean}.png").to_lowercase()
}

/// True if this path is the shared back-face image: base name equals "back",
/// case-insensitive, any supported extension.
pub fn is_back_file(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.eq_ignore_ascii_case("back"))
}

/// Assigns output base names under one of the two naming policies.
///
/// An explicit sequence object rather than a loop-local counter, so ID
/// assignment stays deterministic and testable. The back file never goes
/// through here; it is routed to the fixed name `back` by the driver.
#[derive(Debug)]
pub struct AssetNamer {
    mode: NamingMode,
    next_id: u32,
    records: Vec<NamingRecord>,
}

impl AssetNamer {
    pub fn new(mode: NamingMode, start_id: u32) -> Self {
        Self {
            mode,
            next_id: start_id,
            records: Vec::new(),
        }
    }

    /// Returns the base name (no extension) for the next texture. Consumes one
    /// ID under the ID policy; records the mapping under the name policy.
    pub fn assign(&mut self, source_file_name: &str) -> String {
        match self.mode {
            NamingMode::Id => {
                let id = self.next_id;
                self.next_id += 1;
                id.to_string()
            }
            NamingMode::Name => {
                let file_name = sanitize_file_name(source_file_name);
                let clean_name = file_name.trim_end_matches(".png").to_string();
                self.records.push(NamingRecord {
                    original: source_file_name.to_string(),
                    clean_name: clean_name.clone(),
                });
                clean_name
            }
        }
    }

    pub fn records(&self) -> &[NamingRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<NamingRecord> {
        self.records
    }
}
