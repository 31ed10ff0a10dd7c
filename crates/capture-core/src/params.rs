// File: crates/capture-core/src/params.rs
// Summary: Device parameter values, argument maps, and declared parameter sets.

use std::collections::BTreeMap;
use std::fmt;

/// Value of a single device parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ParamValue::Int(v) => Some(v as f64),
            ParamValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Str(v) => write!(f, "{v:?}"),
            ParamValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for ParamValue { fn from(v: i64) -> Self { ParamValue::Int(v) } }
impl From<i32> for ParamValue { fn from(v: i32) -> Self { ParamValue::Int(v as i64) } }
impl From<u32> for ParamValue { fn from(v: u32) -> Self { ParamValue::Int(v as i64) } }
impl From<f64> for ParamValue { fn from(v: f64) -> Self { ParamValue::Float(v) } }
impl From<f32> for ParamValue { fn from(v: f32) -> Self { ParamValue::Float(v as f64) } }
impl From<bool> for ParamValue { fn from(v: bool) -> Self { ParamValue::Bool(v) } }
impl From<&str> for ParamValue { fn from(v: &str) -> Self { ParamValue::Str(v.to_string()) } }
impl From<String> for ParamValue { fn from(v: String) -> Self { ParamValue::Str(v) } }

/// Named arguments passed to a device when it is opened. Ordered so logs and
/// error messages are deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceArgs(BTreeMap<String, ParamValue>);

impl DeviceArgs {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> { self.0.get(name) }

    pub fn contains(&self, name: &str) -> bool { self.0.contains_key(name) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Numeric parameter, or an error if present with a non-numeric value.
    pub fn f64(&self, name: &str) -> anyhow::Result<Option<f64>> {
        match self.get(name) {
            None => Ok(None),
            Some(v) => v
                .as_f64()
                .map(Some)
                .ok_or_else(|| anyhow::anyhow!("parameter `{name}` must be numeric, got {v}")),
        }
    }

    /// Pixel dimension parameter: numeric, positive, rounded to whole pixels.
    pub fn pixels(&self, name: &str, fallback: u32) -> anyhow::Result<u32> {
        match self.f64(name)? {
            None => Ok(fallback),
            Some(v) if v.is_finite() && v.round() >= 1.0 => Ok(v.round() as u32),
            Some(v) => anyhow::bail!("parameter `{name}` must be a positive pixel count, got {v}"),
        }
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for DeviceArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = DeviceArgs::new();
        for (k, v) in iter {
            args.set(k, v);
        }
        args
    }
}

/// Parameters a device declares, replacing runtime signature inspection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamSpec {
    names: Vec<&'static str>,
    accepts_extra: bool,
}

impl ParamSpec {
    /// A device that accepts exactly the named parameters.
    pub fn fixed(names: &[&'static str]) -> Self {
        Self { names: names.to_vec(), accepts_extra: false }
    }

    /// A device that names some parameters and tolerates any others.
    pub fn open_ended(names: &[&'static str]) -> Self {
        Self { names: names.to_vec(), accepts_extra: true }
    }

    pub fn declares(&self, name: &str) -> bool { self.names.iter().any(|n| *n == name) }

    pub fn accepts_extra(&self) -> bool { self.accepts_extra }

    /// Whether `name` may be passed at all.
    pub fn accepts(&self, name: &str) -> bool { self.accepts_extra || self.declares(name) }

    pub fn names(&self) -> &[&'static str] { &self.names }
}
