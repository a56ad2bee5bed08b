//! Base64 encode/decode throughput over a string of `size` letters `a`.
//!
//! Runs only accumulate output lengths; the checksum hashes a short summary
//! line such as `"encode aaaa... to YWFh...: 327680"`.

use ::base64::Engine as _;
use ::base64::engine::general_purpose::STANDARD;

use crate::checksum::checksum_str;
use crate::error::Result;
use crate::prng::Prng;
use crate::suite_config::ConfigEntry;
use crate::workload::Workload;

/// First four characters followed by `...`, or the whole string when short.
fn abbreviate(s: &str) -> String {
    if s.chars().count() > 4 {
        let head: String = s.chars().take(4).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}

fn sample(entry: &ConfigEntry) -> Result<(String, String)> {
    let plain = "a".repeat(entry.size("size")?);
    let encoded = STANDARD.encode(&plain);
    Ok((plain, encoded))
}

pub struct Base64Encode {
    plain: String,
    encoded: String,
    result: u32,
}

impl Base64Encode {
    pub fn from_config(entry: &ConfigEntry) -> Result<Self> {
        let (plain, encoded) = sample(entry)?;
        Ok(Self {
            plain,
            encoded,
            result: 0,
        })
    }
}

impl Workload for Base64Encode {
    fn name(&self) -> String {
        "Base64::Encode".to_string()
    }

    fn run(&mut self, _rng: &mut Prng, _iteration: u64) {
        let encoded = STANDARD.encode(&self.plain);
        self.result = self.result.wrapping_add(encoded.len() as u32);
    }

    fn checksum(&self) -> u32 {
        checksum_str(&format!(
            "encode {} to {}: {}",
            abbreviate(&self.plain),
            abbreviate(&self.encoded),
            self.result
        ))
    }
}

pub struct Base64Decode {
    plain: String,
    encoded: String,
    result: u32,
}

impl Base64Decode {
    pub fn from_config(entry: &ConfigEntry) -> Result<Self> {
        let (plain, encoded) = sample(entry)?;
        Ok(Self {
            plain,
            encoded,
            result: 0,
        })
    }
}

impl Workload for Base64Decode {
    fn name(&self) -> String {
        "Base64::Decode".to_string()
    }

    fn run(&mut self, _rng: &mut Prng, _iteration: u64) {
        // a failed decode contributes nothing
        if let Ok(decoded) = STANDARD.decode(&self.encoded) {
            self.result = self.result.wrapping_add(decoded.len() as u32);
        }
    }

    fn checksum(&self) -> u32 {
        checksum_str(&format!(
            "decode {} to {}: {}",
            abbreviate(&self.encoded),
            abbreviate(&self.plain),
            self.result
        ))
    }
}
