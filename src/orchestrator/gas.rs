/// Gas limit sizing with randomized padding
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Gas padding policy applied on top of the node's estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasPolicy {
    /// Nominal multiplier applied to the estimate
    pub multiplier: f64,
    /// Random deviation added to the multiplier, drawn from [min, max]
    pub deviation_min: f64,
    pub deviation_max: f64,
    pub min_gas_limit: u64,
    /// Also the fallback limit when estimation fails
    pub max_gas_limit: u64,
}

impl Default for GasPolicy {
    fn default() -> Self {
        Self {
            multiplier: 1.18,
            deviation_min: 0.01,
            deviation_max: 0.02,
            min_gas_limit: 96_258,
            max_gas_limit: 250_000,
        }
    }
}

/// Result of sizing: the gas limit and the multiplier that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasSizing {
    pub gas_limit: u64,
    pub multiplier: f64,
}

impl GasPolicy {
    /// Size the gas limit for an optional base estimate
    pub fn size<R: Rng + ?Sized>(&self, base_gas: Option<u64>, rng: &mut R) -> GasSizing {
        match base_gas {
            None => self.fallback(),
            Some(base) => {
                let deviation = self.draw_deviation(rng);
                self.size_with_deviation(base, deviation)
            }
        }
    }

    /// Deterministic sizing for a known deviation
    pub fn size_with_deviation(&self, base_gas: u64, deviation: f64) -> GasSizing {
        let multiplier = self.multiplier + deviation;
        // f64 -> u64 casts truncate and saturate
        let custom_gas = (base_gas as f64 * multiplier) as u64;

        GasSizing {
            gas_limit: custom_gas.max(self.min_gas_limit).min(self.max_gas_limit),
            multiplier,
        }
    }

    /// Sizing used when no estimate is available
    pub fn fallback(&self) -> GasSizing {
        GasSizing {
            gas_limit: self.max_gas_limit,
            multiplier: self.multiplier,
        }
    }

    fn draw_deviation<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.deviation_max <= self.deviation_min {
            return self.deviation_min;
        }
        rng.gen_range(self.deviation_min..=self.deviation_max)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.multiplier.is_finite() || self.multiplier <= 0.0 {
            return Err(format!("gas multiplier must be positive, got {}", self.multiplier));
        }
        if !self.deviation_min.is_finite() || !self.deviation_max.is_finite() {
            return Err("gas deviation bounds must be finite".to_string());
        }
        if self.deviation_min > self.deviation_max {
            return Err(format!(
                "gas deviation range is empty: [{}, {}]",
                self.deviation_min, self.deviation_max
            ));
        }
        if self.min_gas_limit > self.max_gas_limit {
            return Err(format!(
                "min_gas_limit {} exceeds max_gas_limit {}",
                self.min_gas_limit, self.max_gas_limit
            ));
        }
        Ok(())
    }
}
