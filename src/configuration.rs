use std::fs::File;
use std::io::{
    BufReader,
    Read
};
use std::path::Path;

use log::{
    error,
    info
};
use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

use crate::function::tabulatedfunction::tabulatedfunctionfactory::TabulatedFunctionFactory;
use crate::operation::operationerror::OperationError;
use crate::operation::steppingdifferentialoperator::{
    SteppingDifferentialOperator,
    SteppingScheme
};
use crate::operation::tabulateddifferentialoperator::TabulatedDifferentialOperator;
use crate::operation::tabulatedfunctionoperationservice::TabulatedFunctionOperationService;

pub const DEFAULT_DIFFERENTIAL_STEP: f64 = 1e-4;
/// Digits beyond this no longer change a printed `f64`.
pub const MAX_TEXT_PRECISION: usize = 17;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid differential step: {0}")]
    Step(#[from] OperationError),

    #[error("text precision {got} exceeds {max}")]
    Precision { got: usize, max: usize },
}

/// Choices threaded explicitly into the services built from it.
///
/// Every field has a default, so `{}` is a complete configuration.
/// `text_precision` is absent by default, which writes text exactly:
///
/// ```json
/// {
///     "factory": "linked_list",
///     "differential_step": 0.0001,
///     "stepping_scheme": "central",
///     "text_precision": 6
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub factory: TabulatedFunctionFactory,
    pub differential_step: f64,
    pub stepping_scheme: SteppingScheme,
    pub text_precision: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            factory: TabulatedFunctionFactory::default(),
            differential_step: DEFAULT_DIFFERENTIAL_STEP,
            stepping_scheme: SteppingScheme::default(),
            text_precision: None,
        }
    }
}

impl EngineConfig {
    pub fn from_reader<R>(reader: R) -> Result<EngineConfig, ConfigurationError>
    where
        R: Read,
    {
        let config: EngineConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        info!("configuration loaded: {:?}", config);
        Ok(config)
    }

    pub fn from_path<P>(path: P) -> Result<EngineConfig, ConfigurationError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path.as_ref()).map_err(|err| {
            error!("cannot open {}: {}", path.as_ref().display(), err);
            err
        })?;
        EngineConfig::from_reader(BufReader::new(file))
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.stepping_operator()?;
        if let Some(precision) = self.text_precision.filter(|&p| p > MAX_TEXT_PRECISION) {
            error!("text precision {} exceeds {}", precision, MAX_TEXT_PRECISION);
            return Err(ConfigurationError::Precision { got: precision, max: MAX_TEXT_PRECISION });
        }
        Ok(())
    }

    pub fn operation_service(&self) -> TabulatedFunctionOperationService {
        TabulatedFunctionOperationService::new(self.factory)
    }

    pub fn differential_operator(&self) -> TabulatedDifferentialOperator {
        TabulatedDifferentialOperator::new(self.factory)
    }

    pub fn stepping_operator(&self) -> Result<SteppingDifferentialOperator, OperationError> {
        SteppingDifferentialOperator::new(self.stepping_scheme, self.differential_step)
    }
}
