use std::io::{
    BufRead,
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

/// Writes the point count on the first line, then one `x y` line per
/// sample.
///
/// With `precision` unset every value is written in plain decimal
/// notation with the fewest digits that parse back to the same `f64`, so
/// `read_text` restores the function exactly. `Some(p)` rounds to `p`
/// digits after the decimal point, which can merge knots closer than
/// `10^-p`.
pub fn write_text<W>(
    writer: &mut W,
    function: &dyn TabulatedFunction,
    precision: Option<usize>,
) -> Result<(), FunctionIoError>
where
    W: Write + ?Sized,
{
    info!("writing {} ({} points) as text", function.backend_name(), function.count());
    writeln!(writer, "{}", function.count())?;
    for sample in function.iter() {
        match precision {
            Some(prec) => writeln!(writer, "{:.prec$} {:.prec$}", sample.x(), sample.y())?,
            None => writeln!(writer, "{} {}", sample.x(), sample.y())?,
        }
        trace!("wrote ({}, {})", sample.x(), sample.y());
    }
    writer.flush()?;
    Ok(())
}

pub fn read_text<R>(
    reader: &mut R,
    factory: TabulatedFunctionFactory,
) -> Result<Box<dyn TabulatedFunction>, FunctionIoError>
where
    R: BufRead + ?Sized,
{
    info!("reading text function into {}", factory.backend_name());
    let mut lines = reader.lines();

    let count_line = lines.next().ok_or_else(|| {
        error!("text input is empty");
        FunctionIoError::MissingCount
    })??;
    let token = count_line.trim();
    let count = match token.parse::<i32>() {
        Ok(count) if count > 0 => count as usize,
        _ => {
            error!("line 1: invalid point count '{}'", token);
            return Err(FunctionIoError::InvalidCount { line: 1, token: token.to_owned() });
        }
    };
    debug!("reading {} text points", count);

    let mut x_values = Vec::new();
    let mut y_values = Vec::new();
    for index in 0..count {
        let line = index + 2;
        let content = match lines.next() {
            Some(content) => content?,
            None => {
                error!("line {}: input ended, {} point(s) missing", line, count - index);
                return Err(FunctionIoError::UnexpectedEnd { line, expected: count - index });
            }
        };
        let tokens: Vec<&str> = content.split_whitespace().collect();
        let [x_token, y_token] = tokens.as_slice() else {
            error!("line {}: malformed '{}'", line, content);
            return Err(FunctionIoError::MalformedLine { line, content });
        };
        x_values.push(parse_number(line, x_token)?);
        y_values.push(parse_number(line, y_token)?);
    }

    let function = factory.create(&x_values, &y_values)?;
    info!("read {} with {} points", function.backend_name(), function.count());
    Ok(function)
}

fn parse_number(line: usize, token: &str) -> Result<f64, FunctionIoError> {
    token.parse::<f64>().map_err(|source| {
        error!("line {}: cannot parse '{}'", line, token);
        FunctionIoError::InvalidNumber { line, token: token.to_owned(), source }
    })
}
