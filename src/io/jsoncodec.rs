use std::io::{
    Read,
    Write
};

use log::{
    error,
    info
};
use serde::{
    Deserialize,
    Serialize
};

use crate::function::sample::Sample;
use crate::function::tabulatedfunction::tabulatedfunction::TabulatedFunction;
use crate::function::tabulatedfunction::tabulatedfunctionfactory::TabulatedFunctionFactory;

use super::functionioerror::FunctionIoError;

// {"backend": "array" | "linked_list", "samples": [{"x": .., "y": ..}, ..]}
#[derive(Debug, Serialize, Deserialize)]
struct FunctionDocument {
    backend: TabulatedFunctionFactory,
    samples: Vec<Sample>
}

/// Writes `function` as a JSON document tagged with its storage back-end.
pub fn serialize<W>(writer: &mut W, function: &dyn TabulatedFunction) -> Result<(), FunctionIoError>
where
    W: Write + ?Sized,
{
    let backend = TabulatedFunctionFactory::from_backend_name(function.backend_name())
        .ok_or_else(|| {
            error!("cannot tag unknown back-end {}", function.backend_name());
            FunctionIoError::UnknownBackend { name: function.backend_name().to_owned() }
        })?;
    info!("serializing {} ({} points)", function.backend_name(), function.count());
    let document = FunctionDocument { backend, samples: function.samples() };
    serde_json::to_writer(&mut *writer, &document)?;
    writer.flush()?;
    Ok(())
}

/// Rebuilds the function with the back-end named in the document.
pub fn deserialize<R>(reader: &mut R) -> Result<Box<dyn TabulatedFunction>, FunctionIoError>
where
    R: Read + ?Sized,
{
    let document: FunctionDocument = serde_json::from_reader(&mut *reader)?;
    let (x_values, y_values): (Vec<f64>, Vec<f64>) = document
        .samples
        .iter()
        .map(|sample| (sample.x(), sample.y()))
        .unzip();
    let function = document.backend.create(&x_values, &y_values)?;
    info!("deserialized {} with {} points", function.backend_name(), function.count());
    Ok(function)
}
