use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RandomError {
    #[error("secure random number generator not available in this environment")]
    NoSecureRandomSource,
    #[error("empty range: min {min} is greater than max {max}")]
    EmptyRange { min: i64, max: i64 },
    #[error("range bound is not a finite number")]
    InvalidBound,
    #[error("secure source `{source_name}` failed: {message}")]
    SourceFailure {
        source_name: &'static str,
        message: String,
    },
}

/// Which secure source the trainer should use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RandomSourceKind {
    /// Integer source first, byte source second.
    #[default]
    Auto,
    Integer,
    Bytes,
}

impl RandomSourceKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "integer" | "int" => Some(Self::Integer),
            "bytes" | "byte" => Some(Self::Bytes),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Integer => "integer",
            Self::Bytes => "bytes",
        }
    }
}

/// A cryptographically secure integer generator.
///
/// Implementations never fall back to a non-secure generator: when the
/// underlying platform primitive is gone they report an error instead.
pub trait SecureRandom {
    fn name(&self) -> &'static str;

    /// Probe whether the platform primitive can be used right now.
    fn is_available(&mut self) -> bool;

    /// Uniform integer in `[min, max]`. Callers guarantee `min <= max`.
    fn random_int(&mut self, min: i64, max: i64) -> Result<i64, RandomError>;
}

/// Integer-range primitive: `OsRng` sampled through `gen_range`.
#[derive(Debug, Default)]
pub struct OsIntegerSource;

impl SecureRandom for OsIntegerSource {
    fn name(&self) -> &'static str {
        "os-integer"
    }

    fn is_available(&mut self) -> bool {
        let mut probe = [0u8; 4];
        OsRng.try_fill_bytes(&mut probe).is_ok()
    }

    fn random_int(&mut self, min: i64, max: i64) -> Result<i64, RandomError> {
        Ok(OsRng.gen_range(min..=max))
    }
}

/// Raw-bytes primitive: one u32 from `OsRng`, scaled into the range.
#[derive(Debug, Default)]
pub struct OsByteSource;

impl OsByteSource {
    fn next_u32(&mut self) -> Result<u32, RandomError> {
        let mut buf = [0u8; 4];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| RandomError::SourceFailure {
                source_name: "os-bytes",
                message: e.to_string(),
            })?;
        Ok(u32::from_le_bytes(buf))
    }
}

impl SecureRandom for OsByteSource {
    fn name(&self) -> &'static str {
        "os-bytes"
    }

    fn is_available(&mut self) -> bool {
        self.next_u32().is_ok()
    }

    fn random_int(&mut self, min: i64, max: i64) -> Result<i64, RandomError> {
        let sample = self.next_u32()?;
        Ok(scale_u32(sample, min, max))
    }
}

/// Map a u32 onto `[min, max]`: normalize to `[0, 1)`, scale, floor, offset.
pub fn scale_u32(sample: u32, min: i64, max: i64) -> i64 {
    let range = max as f64 - min as f64 + 1.0;
    let unit = sample as f64 / (u32::MAX as f64 + 1.0);
    let offset = (unit * range).floor() as i64;
    // Float rounding on very wide ranges must not push past `max`.
    (min + offset).min(max)
}

/// Normalize possibly fractional bounds: `ceil(min)`, `floor(max)`.
pub fn normalize_bounds(min: f64, max: f64) -> Result<(i64, i64), RandomError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(RandomError::InvalidBound);
    }
    let lo = min.ceil() as i64;
    let hi = max.floor() as i64;
    if lo > hi {
        return Err(RandomError::EmptyRange { min: lo, max: hi });
    }
    Ok((lo, hi))
}

pub fn candidates_for(kind: RandomSourceKind) -> Vec<Box<dyn SecureRandom>> {
    match kind {
        RandomSourceKind::Auto => vec![
            Box::new(OsIntegerSource) as Box<dyn SecureRandom>,
            Box::new(OsByteSource),
        ],
        RandomSourceKind::Integer => vec![Box::new(OsIntegerSource) as Box<dyn SecureRandom>],
        RandomSourceKind::Bytes => vec![Box::new(OsByteSource) as Box<dyn SecureRandom>],
    }
}

/// First available candidate in priority order.
pub fn select_from(
    candidates: Vec<Box<dyn SecureRandom>>,
) -> Result<Box<dyn SecureRandom>, RandomError> {
    for mut candidate in candidates {
        if candidate.is_available() {
            debug!(source = candidate.name(), "selected secure random source");
            return Ok(candidate);
        }
        debug!(source = candidate.name(), "secure random source unavailable");
    }
    Err(RandomError::NoSecureRandomSource)
}

pub fn select_source(kind: RandomSourceKind) -> Result<Box<dyn SecureRandom>, RandomError> {
    select_from(candidates_for(kind))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Replays a fixed list of draws (clamped into range), cycling forever.
    pub struct ScriptedSource {
        pub draws: Vec<i64>,
        pub pos: usize,
    }

    impl ScriptedSource {
        pub fn new(draws: &[i64]) -> Self {
            Self {
                draws: draws.to_vec(),
                pos: 0,
            }
        }
    }

    impl SecureRandom for ScriptedSource {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn is_available(&mut self) -> bool {
            true
        }

        fn random_int(&mut self, min: i64, max: i64) -> Result<i64, RandomError> {
            let v = self.draws[self.pos % self.draws.len()];
            self.pos += 1;
            Ok(v.clamp(min, max))
        }
    }

    /// A source whose primitive has disappeared.
    pub struct MissingSource;

    impl SecureRandom for MissingSource {
        fn name(&self) -> &'static str {
            "missing"
        }

        fn is_available(&mut self) -> bool {
            false
        }

        fn random_int(&mut self, _min: i64, _max: i64) -> Result<i64, RandomError> {
            Err(RandomError::NoSecureRandomSource)
        }
    }
}
