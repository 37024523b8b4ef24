use std::fmt;
use serde_json::Value as Json;
use super::chain::Vow;

#[derive(Clone)]
pub enum Value {
    Json(Json),
    List(Vec<Value>),
    Deferred(Vow),
}

impl Value {
    pub fn null() -> Self {
        Value::Json(Json::Null)
    }

    pub fn thenable(&self) -> Option<Vow> {
        match self {
            Value::Deferred(vow) => Some(vow.clone()),
            _                    => None,
        }
    }

    pub fn catchable(&self) -> Option<Vow> {
        self.thenable()
    }

    pub fn into_json(self) -> Option<Json> {
        match self {
            Value::Json(json)   => Some(json),
            Value::List(values) => {
                let items = values.into_iter().map(Value::into_json);
                Some(Json::Array(items.collect::<Option<_>>()?))
            }
            Value::Deferred(_)  => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Json(a), Value::Json(b))         => a == b,
            (Value::List(a), Value::List(b))         => a == b,
            (Value::Deferred(a), Value::Deferred(b)) => a == b,
            _                                        => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Json(json)    => write!(f, "{json}"),
            Value::List(values)  => {
                write!(f, "[")?;
                for (index, value) in values.iter().enumerate() {
                    match index {
                        0 => write!(f, "{value}")?,
                        _ => write!(f, ", {value}")?,
                    }
                }
                write!(f, "]")
            }
            Value::Deferred(vow) => write!(f, "{vow:?}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        Value::Json(json)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(values)
    }
}

impl From<Vow> for Value {
    fn from(vow: Vow) -> Self {
        Value::Deferred(vow)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::null()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Json(Json::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Json(Json::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Json(Json::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Json(Json::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Json(Json::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Json(Json::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Json(Json::from(value))
    }
}
