use distmarket_ports::Oracle;
use log::info;
use parking_lot::RwLock;

/// Oracle holding a single settable outcome
#[derive(Debug, Default)]
pub struct SimpleOracle {
    value: RwLock<Option<f64>>,
}

impl SimpleOracle {
    /// Oracle with no outcome yet
    pub fn pending() -> Self {
        Self::default()
    }

    /// Oracle that already knows the outcome
    pub fn resolved(value: f64) -> Self {
        Self {
            value: RwLock::new(Some(value)),
        }
    }

    /// Record the outcome
    pub fn resolve(&self, value: f64) {
        info!("Oracle resolved value={}", value);
        *self.value.write() = Some(value);
    }
}

impl Oracle for SimpleOracle {
    fn resolution_value(&self) -> Option<f64> {
        *self.value.read()
    }

    fn name(&self) -> &str {
        "SimpleOracle"
    }
}
