use crate::pattern::Pattern;
use cv_core::{cv_to_code, ConvertError};
use std::collections::HashMap;

/// Deduplicated DAC codes across a set of patterns.
///
/// Index 0 always holds code 0 so the sequencer can treat "table slot 0" as
/// the pause slot; all other distinct codes follow in ascending order. Each
/// nonzero code remembers the display name of the first note that produced
/// it, for comments and the report.
#[derive(Debug, Clone)]
pub struct VoltageTable {
    codes: Vec<u32>,
    names: HashMap<u32, String>,
    index: HashMap<u32, usize>,
}

impl VoltageTable {
    pub fn build(patterns: &[Pattern], vref: f64, bits: u32) -> Result<Self, ConvertError> {
        let mut codes = vec![0u32];
        let mut names = HashMap::new();

        for pattern in patterns {
            for note in &pattern.notes {
                let code = cv_to_code(note.cv, vref, bits)?;
                if !codes.contains(&code) {
                    codes.push(code);
                    names.insert(code, capitalize(&note.name));
                }
            }
        }
        codes.sort_unstable();

        let index = codes
            .iter()
            .enumerate()
            .map(|(i, &code)| (code, i))
            .collect();

        Ok(VoltageTable {
            codes,
            names,
            index,
        })
    }

    /// Table position for a code; code 0 is always the pause slot.
    pub fn index_of(&self, code: u32) -> usize {
        if code == 0 {
            0
        } else {
            self.index.get(&code).copied().unwrap_or(0)
        }
    }

    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    /// Display name for a code, if any note produced it.
    pub fn name_of(&self, code: u32) -> Option<&str> {
        self.names.get(&code).map(|s| s.as_str())
    }

    /// Number of table entries, pause slot included.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
