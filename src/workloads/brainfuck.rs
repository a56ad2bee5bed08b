//! Brainfuck interpreter over a growable byte tape.
//!
//! Warmup runs `warmup_program` instead of `program` and leaves the result
//! register alone, so a heavy measured program can be warmed up on a cheap one.

use crate::error::{HarnessError, Result};
use crate::prng::Prng;
use crate::suite_config::ConfigEntry;
use crate::workload::Workload;

const TAPE_SIZE: usize = 30_000;

struct Tape {
    cells: Vec<u8>,
    pos: usize,
}

impl Tape {
    fn new() -> Self {
        Self {
            cells: vec![0; TAPE_SIZE],
            pos: 0,
        }
    }

    #[inline]
    fn get(&self) -> u8 {
        self.cells[self.pos]
    }

    #[inline]
    fn inc(&mut self) {
        self.cells[self.pos] = self.cells[self.pos].wrapping_add(1);
    }

    #[inline]
    fn dec(&mut self) {
        self.cells[self.pos] = self.cells[self.pos].wrapping_sub(1);
    }

    #[inline]
    fn advance(&mut self) {
        self.pos += 1;
        if self.pos >= self.cells.len() {
            self.cells.push(0);
        }
    }

    #[inline]
    fn retreat(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }
}

/// A parsed program with precomputed bracket jumps.
pub struct Program {
    commands: Vec<u8>,
    jumps: Vec<usize>,
}

impl Program {
    /// Parse `text`, ignoring non-command characters.
    ///
    /// Returns `None` for unbalanced brackets or input (`,`) commands.
    pub fn parse(text: &str) -> Option<Self> {
        let commands: Vec<u8> = text
            .bytes()
            .filter(|c| matches!(*c, b'+' | b'-' | b'>' | b'<' | b'[' | b']' | b'.' | b','))
            .collect();
        if commands.contains(&b',') {
            return None;
        }

        let mut jumps = vec![0; commands.len()];
        let mut stack = Vec::new();
        for (i, &cmd) in commands.iter().enumerate() {
            match cmd {
                b'[' => stack.push(i),
                b']' => {
                    let start = stack.pop()?;
                    jumps[start] = i;
                    jumps[i] = start;
                }
                _ => {}
            }
        }

        stack.is_empty().then_some(Self { commands, jumps })
    }

    /// Execute; every `.` folds the current cell into `result = result * 4 + cell`.
    pub fn run(&self) -> u32 {
        let mut tape = Tape::new();
        let mut pc = 0;
        let mut result = 0u32;

        while let Some(&cmd) = self.commands.get(pc) {
            match cmd {
                b'+' => tape.inc(),
                b'-' => tape.dec(),
                b'>' => tape.advance(),
                b'<' => tape.retreat(),
                b'[' if tape.get() == 0 => pc = self.jumps[pc],
                b']' if tape.get() != 0 => pc = self.jumps[pc],
                b'.' => result = (result << 2).wrapping_add(tape.get() as u32),
                _ => {}
            }
            pc += 1;
        }

        result
    }
}

pub struct BrainfuckArray {
    program: String,
    warmup_program: String,
    result: u32,
}

impl BrainfuckArray {
    pub fn from_config(entry: &ConfigEntry) -> Result<Self> {
        let program = Self::checked(entry, "program")?;
        let warmup_program = Self::checked(entry, "warmup_program")?;
        Ok(Self {
            program,
            warmup_program,
            result: 0,
        })
    }

    fn checked(entry: &ConfigEntry, field: &str) -> Result<String> {
        let text = entry.string(field)?;
        if Program::parse(text).is_none() {
            return Err(HarnessError::invalid_field(
                entry.name(),
                field,
                "balanced brainfuck program without input",
            ));
        }
        Ok(text.to_string())
    }

    fn execute(source: &str) -> u32 {
        // validated at construction
        Program::parse(source).map_or(0, |p| p.run())
    }
}

impl Workload for BrainfuckArray {
    fn name(&self) -> String {
        "Brainfuck::Array".to_string()
    }

    fn warmup(&mut self, _rng: &mut Prng, iterations: u64) {
        for _ in 0..iterations {
            std::hint::black_box(Self::execute(&self.warmup_program));
        }
    }

    fn run(&mut self, _rng: &mut Prng, _iteration: u64) {
        self.result = self.result.wrapping_add(Self::execute(&self.program));
    }

    fn checksum(&self) -> u32 {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workloads::test_support::{drive, entry};

    const HELLO: &str = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";

    #[test]
    fn test_output_fold() {
        // cell 3, printed twice: (3 << 2) + 3
        assert_eq!(Program::parse("+++..").unwrap().run(), 15);
        // comments are ignored
        assert_eq!(Program::parse("+ add one . print").unwrap().run(), 1);
    }

    #[test]
    fn test_rejects_bad_programs() {
        assert!(Program::parse("[[]").is_none());
        assert!(Program::parse("]").is_none());
        assert!(Program::parse("+,.").is_none());
        assert!(Program::parse("").is_some());
    }

    #[test]
    fn test_retreat_saturates_at_zero() {
        assert_eq!(Program::parse("<<+.").unwrap().run(), 1);
    }

    #[test]
    fn test_warmup_leaves_register_untouched() {
        let e = entry(
            "Brainfuck::Array",
            &format!(r#"{{"program": "+.", "warmup_program": "{}"}}"#, HELLO),
        );
        let mut w = BrainfuckArray::from_config(&e).unwrap();
        w.warmup(&mut Prng::new(), 5);
        assert_eq!(w.checksum(), 0);
    }

    #[test]
    fn test_measured_checksum_independent_of_warmup_count() {
        let checksum = |warmup: u64| {
            let e = entry(
                "Brainfuck::Array",
                &format!(
                    r#"{{"program": "{0}", "warmup_program": "{0}", "warmup_iterations": {1}, "iterations": 2}}"#,
                    HELLO, warmup
                ),
            );
            let mut w = BrainfuckArray::from_config(&e).unwrap();
            drive(&mut w, &e)
        };
        assert_eq!(checksum(0), checksum(1));
        assert_eq!(checksum(0), checksum(7));
    }

    #[test]
    fn test_invalid_program_is_a_config_error() {
        let e = entry("Brainfuck::Array", r#"{"program": "[", "warmup_program": "+"}"#);
        assert!(matches!(
            BrainfuckArray::from_config(&e),
            Err(HarnessError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_smoke_checksum() {
        let e = entry(
            "Brainfuck::Array",
            &format!(
                r#"{{"checksum": 3562897308, "program": "{0}", "warmup_program": "{0}", "warmup_iterations": 1, "iterations": 2}}"#,
                HELLO
            ),
        );
        let mut w = BrainfuckArray::from_config(&e).unwrap();
        assert_eq!(drive(&mut w, &e), 3562897308);
    }
}
