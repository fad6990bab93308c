use sonomark_crypto::EncVariant;
use sonomark_ecc::ErrorCorrection;

use crate::error::StegoError;

/// Everything the embedder needs to know, chosen by the caller at encode time
/// and reconstructed from the embedded header at decode time.
#[derive(Debug, Clone, Copy)]
pub struct EncodingConfig {
    /// How many least-significant bits of each eligible carrier position are
    /// used, 1..=16. Values above 8 span into the high byte of the 16-bit
    /// sample at the position.
    pub lsb: u8,
    /// Every `stride`-th byte of the data region is eligible; the rest pass
    /// through untouched.
    pub stride: u16,
    /// Redundancy parameter handed to the error-correction variant.
    pub redundant_bits: u16,
    pub error_correction: ErrorCorrection,
    pub encryption: EncVariant,
    /// Cyclically repeat the coded payload until capacity is exhausted, so a
    /// fragment of the carrier still yields a copy.
    pub repeat_data: bool,
}

impl Default for EncodingConfig {
    /// The parameters the original fingerprinting deployment used.
    fn default() -> Self {
        EncodingConfig {
            lsb: 2,
            stride: 4,
            redundant_bits: 8,
            error_correction: ErrorCorrection::None,
            encryption: EncVariant::None,
            repeat_data: false,
        }
    }
}

impl EncodingConfig {
    /// Centralized validation; every encode and every parsed header passes
    /// through here before any carrier byte is touched.
    pub fn validate(&self) -> Result<(), StegoError> {
        if !(1..=16).contains(&self.lsb) {
            return Err(StegoError::InvalidConfig {
                context: "lsb must be in 1..=16",
            });
        }
        if self.stride < 1 {
            return Err(StegoError::InvalidConfig {
                context: "stride must be at least 1",
            });
        }
        if self.lsb > 8 && self.stride < 2 {
            return Err(StegoError::InvalidConfig {
                context: "stride must be at least 2 when lsb exceeds 8",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        EncodingConfig::default().validate().expect("valid");
    }

    #[test]
    fn lsb_bounds_are_enforced() {
        let mut config = EncodingConfig::default();
        config.lsb = 0;
        assert!(config.validate().is_err());
        config.lsb = 17;
        assert!(config.validate().is_err());
        config.lsb = 16;
        config.stride = 2;
        config.validate().expect("valid");
    }

    #[test]
    fn wide_lsb_requires_spacing() {
        let mut config = EncodingConfig::default();
        config.lsb = 12;
        config.stride = 1;
        assert!(matches!(
            config.validate(),
            Err(StegoError::InvalidConfig { .. })
        ));
        config.stride = 2;
        config.validate().expect("valid");
    }

    #[test]
    fn zero_stride_is_rejected() {
        let mut config = EncodingConfig::default();
        config.stride = 0;
        assert!(config.validate().is_err());
    }
}
