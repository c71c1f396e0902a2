use crate::pattern::Pattern;
use crate::table::VoltageTable;
use std::fmt;

/// Summary statistics over a compiled pattern set, printed after emission so
/// the firmware author can sanity-check ranges and sizing.
#[derive(Debug, Clone)]
pub struct Report {
    lowest: Option<(String, u32)>,
    highest: Option<(String, u32)>,
    unique_notes: usize,
    shortest_note: Option<u32>,
    longest_note: Option<u32>,
    shortest_pattern: u32,
    longest_pattern: u32,
    longest_index: usize,
    second_longest_pattern: u32,
    second_longest_index: usize,
    length_resolution: u32,
}

impl Report {
    pub fn build(patterns: &[Pattern], table: &VoltageTable, resolution: u32) -> Self {
        let named = |code: u32| {
            (
                table.name_of(code).unwrap_or("- (pause)").to_string(),
                code,
            )
        };
        let nonzero = &table.codes()[1..];
        let lowest = nonzero.first().map(|&c| named(c));
        let highest = nonzero.last().map(|&c| named(c));

        let durations: Vec<u32> = patterns
            .iter()
            .flat_map(|p| p.notes.iter().map(|n| n.duration))
            .collect();

        let totals: Vec<u32> = patterns.iter().map(|p| p.total_units()).collect();
        let mut longest_pattern = 0;
        let mut longest_index = 0;
        let mut second_longest_pattern = 0;
        let mut second_longest_index = 0;
        for (i, &total) in totals.iter().enumerate() {
            if total > longest_pattern {
                second_longest_pattern = longest_pattern;
                second_longest_index = longest_index;
                longest_pattern = total;
                longest_index = i;
            } else if total > second_longest_pattern {
                second_longest_pattern = total;
                second_longest_index = i;
            }
        }

        let common = totals.iter().copied().fold(0, gcd);

        Report {
            lowest,
            highest,
            unique_notes: table.len(),
            shortest_note: durations.iter().copied().min(),
            longest_note: durations.iter().copied().max(),
            shortest_pattern: totals.iter().copied().min().unwrap_or(0),
            longest_pattern,
            longest_index,
            second_longest_pattern,
            second_longest_index,
            length_resolution: if common == 0 {
                1
            } else {
                (resolution / common).max(1)
            },
        }
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((name, code)) = &self.lowest {
            writeln!(f, "Lower note: {} ({})", name, code)?;
        }
        if let Some((name, code)) = &self.highest {
            writeln!(f, "Higher note: {} ({})", name, code)?;
        }
        writeln!(
            f,
            "Number of unique notes: {} (including pause)",
            self.unique_notes
        )?;
        if let (Some(shortest), Some(longest)) = (self.shortest_note, self.longest_note) {
            writeln!(f, "Duration of the shortest note: {}", shortest)?;
            writeln!(f, "Duration of the longest note: {}", longest)?;
        }
        writeln!(
            f,
            "Duration of the shortest pattern: {}",
            self.shortest_pattern
        )?;
        writeln!(
            f,
            "Duration of the longest pattern: {} (#{}), followed by {} (#{})",
            self.longest_pattern,
            self.longest_index + 1,
            self.second_longest_pattern,
            self.second_longest_index + 1
        )?;
        write!(
            f,
            "Greatest possible resolution for patterns length: */{}",
            self.length_resolution
        )
    }
}
