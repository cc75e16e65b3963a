use std::io::{
    ErrorKind,
    Read,
    Write
};

use log::{
    debug,
    error,
    info,
    trace
};

use crate::function::tabulatedfunction::tabulatedfunction::TabulatedFunction;
use crate::function::tabulatedfunction::tabulatedfunctionfactory::TabulatedFunctionFactory;

use super::functionioerror::FunctionIoError;

const COUNT_BYTES: usize = 4;
const SAMPLE_BYTES: usize = 16;
// The header is untrusted; larger inputs grow as samples arrive.
const PREALLOCATED_SAMPLES: usize = 4096;

/// Writes `count` as a big-endian `i32`, then `x, y` per sample as
/// big-endian IEEE-754 doubles.
pub fn write_binary<W>(writer: &mut W, function: &dyn TabulatedFunction) -> Result<(), FunctionIoError>
where
    W: Write + ?Sized,
{
    let count = function.count();
    info!("writing {} ({} points) as binary", function.backend_name(), count);
    let header = i32::try_from(count).map_err(|_| {
        error!("{} points do not fit a 32-bit count", count);
        FunctionIoError::InvalidPointCount { count: count as i64 }
    })?;
    writer.write_all(&header.to_be_bytes())?;
    for sample in function.iter() {
        writer.write_all(&sample.x().to_be_bytes())?;
        writer.write_all(&sample.y().to_be_bytes())?;
        trace!("wrote ({}, {})", sample.x(), sample.y());
    }
    writer.flush()?;
    debug!("binary write finished");
    Ok(())
}

pub fn read_binary<R>(
    reader: &mut R,
    factory: TabulatedFunctionFactory,
) -> Result<Box<dyn TabulatedFunction>, FunctionIoError>
where
    R: Read + ?Sized,
{
    info!("reading binary function into {}", factory.backend_name());
    let mut header = [0u8; COUNT_BYTES];
    fill(reader, &mut header, 0, COUNT_BYTES)?;
    let count = i32::from_be_bytes(header);
    if count <= 0 {
        error!("invalid binary point count {}", count);
        return Err(FunctionIoError::InvalidPointCount { count: i64::from(count) });
    }
    let count = count as usize;
    debug!("reading {} binary points", count);

    let expected = COUNT_BYTES + count * SAMPLE_BYTES;
    let mut x_values = Vec::with_capacity(count.min(PREALLOCATED_SAMPLES));
    let mut y_values = Vec::with_capacity(count.min(PREALLOCATED_SAMPLES));
    let mut buffer = [0u8; SAMPLE_BYTES];
    for index in 0..count {
        fill(reader, &mut buffer, COUNT_BYTES + index * SAMPLE_BYTES, expected)?;
        let (x, y) = buffer.split_at(8);
        let mut x_bytes = [0u8; 8];
        let mut y_bytes = [0u8; 8];
        x_bytes.copy_from_slice(x);
        y_bytes.copy_from_slice(y);
        x_values.push(f64::from_be_bytes(x_bytes));
        y_values.push(f64::from_be_bytes(y_bytes));
    }

    let function = factory.create(&x_values, &y_values)?;
    info!("read {} with {} points", function.backend_name(), function.count());
    Ok(function)
}

/// `read_exact` that reports how many bytes of the whole message arrived
/// before the stream ended. `offset` is the number consumed before `buffer`.
fn fill<R>(reader: &mut R, buffer: &mut [u8], offset: usize, expected: usize) -> Result<(), FunctionIoError>
where
    R: Read + ?Sized,
{
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => {
                let read = offset + filled;
                error!("binary stream truncated after {} of {} bytes", read, expected);
                return Err(FunctionIoError::Truncated {
                    expected,
                    read,
                    source: ErrorKind::UnexpectedEof.into(),
                });
            }
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
