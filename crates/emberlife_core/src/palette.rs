//! Warm "ember" birth colours.
//!
//! Each channel is drawn uniformly between its base and a shared ceiling
//! (red sits highest, blue near zero), then the triple is rescaled so the
//! channel sum lands on a target luminance. The result varies per draw but
//! every colour reads equally bright on the panel.

use emberlife_data::Rgb;
use rand::Rng;

use crate::config::PaletteConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ColorGenerator {
    base: [u8; 3],
    ceiling: u8,
    luminance: u32,
}

impl Default for ColorGenerator {
    fn default() -> Self {
        Self::new(&PaletteConfig::default())
    }
}

impl ColorGenerator {
    pub fn new(config: &PaletteConfig) -> Self {
        Self {
            base: config.base,
            ceiling: config.ceiling,
            luminance: config.luminance,
        }
    }

    pub fn luminance(&self) -> u32 {
        self.luminance
    }

    /// Draws one brightness-normalised colour.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        let raw = self.base.map(|lo| {
            let lo = lo.min(self.ceiling);
            rng.gen_range(lo..=self.ceiling) as u64
        });
        self.normalise(raw)
    }

    fn normalise(&self, raw: [u64; 3]) -> Rgb {
        let sum: u64 = raw.iter().sum();
        if sum == 0 {
            return Rgb::grey((self.luminance / 3).min(255) as u8);
        }
        let lux = self.luminance as u64;
        let [r, g, b] = raw.map(|c| (lux * c / sum).min(255) as u8);
        Rgb::new(r, g, b)
    }
}
