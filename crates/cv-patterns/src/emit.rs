use crate::pattern::Pattern;
use crate::table::VoltageTable;
use cv_core::{cv_to_code, ConvertError};

/// Emits the `patterns.h` artifact consumed by the sequencer firmware.
///
/// The header holds the deduplicated CV table, per-pattern index/duration
/// matrices in PROGMEM with pointer arrays over them, bit-packed slide
/// flags, the per-pattern acciaccatura CVs and the pattern sizes.
pub struct HeaderEmitter {
    pub resolution: u32,
    pub vref: f64,
    pub bits: u32,
    pub tuning_cv: u32,
}

impl HeaderEmitter {
    /// Each entry pairs a pattern's source text (kept for the generated
    /// comments) with its parsed form.
    pub fn emit(
        &self,
        entries: &[(String, Pattern)],
        table: &VoltageTable,
    ) -> Result<String, ConvertError> {
        let mut matrices = String::new();
        let mut pointers = String::new();

        // Lay each matrix out as one distinct array per pattern plus a
        // pointers array over them, so rows can differ in length.
        let mut matrix_and_pointers = |ctype: &str, name: &str, values: &dyn Fn(usize) -> String| {
            pointers.push_str(&format!("const {}* const {}[] PROGMEM = {{\n", ctype, name));
            for (i, (source, _)) in entries.iter().enumerate() {
                let row = format!("{}_{:02}", name, i + 1);
                matrices.push_str(&format!(
                    "const {} {}[] PROGMEM = {{ {} }}; // {}\n",
                    ctype,
                    row,
                    values(i),
                    source.trim()
                ));
                pointers.push_str(&format!("\t{},\n", row));
            }
            matrices.push('\n');
            pointers.push_str("};\n\n");
        };

        // Unique CV values, pause slot first.
        let mut cv_block = String::from("const unsigned int PATTERNS_CV[] = {\n");
        for &code in table.codes() {
            let name = table.name_of(code).unwrap_or("- (pause)");
            cv_block.push_str(&format!("\t{:>4}, // {}\n", code, name));
        }
        cv_block.push_str("};\n\n");

        // Per-note indexes into the CV table.
        let codes_per_pattern: Vec<Vec<u32>> = entries
            .iter()
            .map(|(_, p)| {
                p.notes
                    .iter()
                    .map(|n| cv_to_code(n.cv, self.vref, self.bits))
                    .collect()
            })
            .collect::<Result<_, _>>()?;
        matrix_and_pointers("byte", "PATTERNS_CV_INDEX", &|i| {
            codes_per_pattern[i]
                .iter()
                .map(|&code| format!("{:>2}", table.index_of(code)))
                .collect::<Vec<_>>()
                .join(", ")
        });

        // Durations, with the pattern total in a leading comment.
        matrix_and_pointers("byte", "PATTERNS_DURATION", &|i| {
            let pattern = &entries[i].1;
            let row = pattern
                .notes
                .iter()
                .map(|n| format!("{:>2}", n.duration))
                .collect::<Vec<_>>()
                .join(", ");
            format!("/* Total: {:>3} */ {}", pattern.total_units(), row)
        });

        // Slide flags, packed 8 per byte, first note in the MSB.
        matrix_and_pointers("byte", "PATTERNS_SLIDE", &|i| {
            let slides: Vec<bool> = entries[i].1.notes.iter().map(|n| n.slide).collect();
            slides
                .chunks(8)
                .map(|chunk| {
                    let mut byte = String::from("B");
                    for k in 0..8 {
                        byte.push(if chunk.get(k).copied().unwrap_or(false) {
                            '1'
                        } else {
                            '0'
                        });
                    }
                    byte
                })
                .collect::<Vec<_>>()
                .join(", ")
        });

        // One acciaccatura CV per pattern, 0 when absent.
        let mut grace_block =
            String::from("const unsigned int PATTERNS_ACCIACCATURA_CV[] PROGMEM = {\n");
        for (i, (_, pattern)) in entries.iter().enumerate() {
            let code = match pattern.acciaccatura {
                Some(cv) => cv_to_code(cv, self.vref, self.bits)?,
                None => 0,
            };
            grace_block.push_str(&format!("\t{:>4}, // Pattern #{}\n", code, i + 1));
        }
        grace_block.push_str("};\n\n");

        let mut size_block = String::from("const byte PATTERNS_SIZE[] PROGMEM = {\n");
        for (i, (_, pattern)) in entries.iter().enumerate() {
            size_block.push_str(&format!(
                "\t{:>4}, // Pattern #{}\n",
                pattern.notes.len(),
                i + 1
            ));
        }
        size_block.push_str("};\n\n");

        let duration_max = entries
            .iter()
            .map(|(_, p)| p.total_units())
            .max()
            .unwrap_or(0);

        let mut code = String::from(
            "#ifndef patterns_h\n#define patterns_h\n\n#include \"Arduino.h\"\n#include <avr/pgmspace.h>\n\n",
        );
        code.push_str(&format!("#define PATTERNS_N {}\n", entries.len()));
        code.push_str(&format!(
            "#define PATTERNS_DURATION_RESOLUTION {}\n",
            self.resolution
        ));
        code.push_str(&format!("#define PATTERNS_DURATION_MAX {}\n", duration_max));
        code.push_str(&format!("#define TUNING_CV {}\n\n", self.tuning_cv));
        code.push_str(&cv_block);
        code.push_str(&matrices);
        code.push_str(&grace_block);
        code.push_str(&size_block);
        code.push_str(&pointers);
        code.push_str("#endif");

        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_pattern;

    fn emit(sources: &[&str]) -> String {
        let entries: Vec<(String, Pattern)> = sources
            .iter()
            .map(|s| (s.to_string(), parse_pattern(s, 16).unwrap()))
            .collect();
        let patterns: Vec<Pattern> = entries.iter().map(|(_, p)| p.clone()).collect();
        let table = VoltageTable::build(&patterns, 4.096, 12).unwrap();
        let emitter = HeaderEmitter {
            resolution: 16,
            vref: 4.096,
            bits: 12,
            tuning_cv: 2000,
        };
        emitter.emit(&entries, &table).unwrap()
    }

    #[test]
    fn test_defines() {
        let header = emit(&["C3/2 C4/2", "C3/1"]);
        assert!(header.starts_with("#ifndef patterns_h"));
        assert!(header.ends_with("#endif"));
        assert!(header.contains("#define PATTERNS_N 2\n"));
        assert!(header.contains("#define PATTERNS_DURATION_RESOLUTION 16\n"));
        // Both patterns total 16 units.
        assert!(header.contains("#define PATTERNS_DURATION_MAX 16\n"));
        assert!(header.contains("#define TUNING_CV 2000\n"));
    }

    #[test]
    fn test_cv_table_block() {
        let header = emit(&["C3/4"]);
        assert!(header.contains("const unsigned int PATTERNS_CV[] = {\n\t   0, // - (pause)\n"));
        assert!(header.contains("// C3\n"));
    }

    #[test]
    fn test_matrices_and_pointers() {
        let header = emit(&["C3/2 C4/2"]);
        assert!(header.contains(
            "const byte PATTERNS_CV_INDEX_01[] PROGMEM = {  1,  2 }; // C3/2 C4/2\n"
        ));
        assert!(header.contains(
            "const byte PATTERNS_DURATION_01[] PROGMEM = { /* Total:  16 */  8,  8 }; // C3/2 C4/2\n"
        ));
        assert!(header.contains("const byte* const PATTERNS_CV_INDEX[] PROGMEM = {\n\tPATTERNS_CV_INDEX_01,\n};\n"));
    }

    #[test]
    fn test_each_row_carries_its_own_source() {
        // Row comments come from the entry paired with the pattern, so
        // every matrix row names the line it was compiled from.
        let header = emit(&["C3/4", "D3/4"]);
        assert!(header.contains("PATTERNS_CV_INDEX_01[] PROGMEM = {  1 }; // C3/4\n"));
        assert!(header.contains("PATTERNS_CV_INDEX_02[] PROGMEM = {  2 }; // D3/4\n"));
        assert!(header.contains("PATTERNS_SLIDE_02[] PROGMEM = { B00000000 }; // D3/4\n"));
    }

    #[test]
    fn test_slide_bitpacking() {
        // First note slides into the second, so the first (most significant)
        // bit of the first byte is set.
        let header = emit(&["C3/2~ C4/4 D4/4"]);
        assert!(header.contains("PATTERNS_SLIDE_01[] PROGMEM = { B10000000 }"));
    }

    #[test]
    fn test_acciaccatura_and_size_blocks() {
        let header = emit(&["(C2)C3/2 C4/2", "C3/1"]);
        assert!(header.contains("const unsigned int PATTERNS_ACCIACCATURA_CV[] PROGMEM = {\n"));
        // Second pattern has no grace note.
        assert!(header.contains("\t   0, // Pattern #2\n"));
        assert!(header.contains("const byte PATTERNS_SIZE[] PROGMEM = {\n\t   2, // Pattern #1\n\t   1, // Pattern #2\n};\n"));
    }
}
