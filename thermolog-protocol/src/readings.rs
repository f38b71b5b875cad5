//! Temperature vectors
//!
//! One sweep yields one [`Readings`]: an averaged Celsius value per active
//! channel, in physical channel order starting at channel 1. A channel whose
//! every sample failed carries `None` and is printed as `nan`.

use core::fmt;
use heapless::Vec;

/// Maximum number of thermocouple channels in a sweep
pub const MAX_CHANNELS: usize = 12;

/// Text printed for a channel with no valid sample
pub const INVALID_TEXT: &str = "nan";

/// Averaged temperatures from one sweep, indexed by physical channel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Readings {
    values: Vec<Option<f32>, MAX_CHANNELS>,
}

impl Readings {
    /// Create an empty vector
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Append the reading for the next channel
    ///
    /// Returns the reading back if all `MAX_CHANNELS` slots are used.
    pub fn push(&mut self, reading: Option<f32>) -> Result<(), Option<f32>> {
        self.values.push(reading)
    }

    /// Number of channels recorded
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no channel has been recorded
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reading for a physical channel (1-based)
    ///
    /// Returns `None` if the channel was not part of the sweep, and
    /// `Some(None)` if it was swept but had no valid sample.
    pub fn channel(&self, channel: u8) -> Option<Option<f32>> {
        let index = (channel as usize).checked_sub(1)?;
        self.values.get(index).copied()
    }

    /// Iterate `(channel, reading)` pairs in ascending channel order
    pub fn iter(&self) -> impl Iterator<Item = (u8, Option<f32>)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| ((i + 1) as u8, *v))
    }

    /// Number of channels that produced a valid average
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Raw readings slice, index 0 is channel 1
    pub fn as_slice(&self) -> &[Option<f32>] {
        &self.values
    }
}

impl fmt::Display for Readings {
    /// Comma-separated values with two decimals, no trailing comma
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, reading) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match reading {
                Some(celsius) => write!(f, "{:.2}", celsius)?,
                None => f.write_str(INVALID_TEXT)?,
            }
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Readings {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Readings[");
        for (i, reading) in self.values.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            match reading {
                Some(celsius) => defmt::write!(f, "{}", celsius),
                None => defmt::write!(f, "{}", INVALID_TEXT),
            }
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::format;

    fn readings(values: &[Option<f32>]) -> Readings {
        let mut r = Readings::new();
        for v in values {
            r.push(*v).unwrap();
        }
        r
    }

    #[test]
    fn test_format_two_decimals() {
        let r = readings(&[Some(21.5), Some(22.0), Some(-3.25)]);
        assert_eq!(format!("{}", r), "21.50,22.00,-3.25");
    }

    #[test]
    fn test_format_invalid_channel() {
        let r = readings(&[Some(20.25), None, Some(19.75)]);
        assert_eq!(format!("{}", r), "20.25,nan,19.75");
    }

    #[test]
    fn test_format_single_and_empty() {
        assert_eq!(format!("{}", readings(&[Some(100.0)])), "100.00");
        assert_eq!(format!("{}", Readings::new()), "");
    }

    #[test]
    fn test_channel_lookup_is_one_based() {
        let r = readings(&[Some(1.0), None]);
        assert_eq!(r.channel(0), None);
        assert_eq!(r.channel(1), Some(Some(1.0)));
        assert_eq!(r.channel(2), Some(None));
        assert_eq!(r.channel(3), None);
    }

    #[test]
    fn test_iter_pairs_channels() {
        let r = readings(&[Some(1.0), Some(2.0), None]);
        let channels: std::vec::Vec<u8> = r.iter().map(|(ch, _)| ch).collect();
        assert_eq!(channels, [1, 2, 3]);
        assert_eq!(r.valid_count(), 2);
    }

    #[test]
    fn test_capacity() {
        let mut r = Readings::new();
        for _ in 0..MAX_CHANNELS {
            r.push(Some(0.0)).unwrap();
        }
        assert_eq!(r.push(Some(1.0)), Err(Some(1.0)));
        assert_eq!(r.len(), MAX_CHANNELS);
    }
}
