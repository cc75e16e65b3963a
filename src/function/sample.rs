use serde::{
    Deserialize,
    Serialize
};

/// One knot of a tabulated function.
///
/// Serialized as `{"x": .., "y": ..}`; non-finite values are written as
/// the strings `"NaN"`, `"inf"` and `"-inf"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(with = "lenient_f64")]
    x: f64,
    #[serde(with = "lenient_f64")]
    y: f64
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Sample {
        Sample { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn slope(lhs: &Sample, rhs: &Sample) -> f64 {
        (rhs.y - lhs.y) / (rhs.x - lhs.x)
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Sample {
        Sample::new(x, y)
    }
}

// JSON has no literal for NaN or infinity.
mod lenient_f64 {
    use serde::de::Error;
    use serde::{
        Deserialize,
        Deserializer,
        Serializer
    };

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&value.to_string())
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.parse::<f64>() {
                Ok(value) if !value.is_finite() => Ok(value),
                _ => Err(D::Error::custom(format!("expected a number, NaN or inf, found '{}'", text))),
            },
        }
    }
}
