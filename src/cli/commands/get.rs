//! Implementation of the `confkit get` command.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::config::{ConfigStore, SharedConfig};

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Dotted key path, e.g. `server.http.port`
    pub key: String,

    /// Type to coerce the value to
    #[arg(long = "as", value_enum, default_value_t = ValueKind::Raw)]
    pub kind: ValueKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// The stored value, untouched
    Raw,
    String,
    Int,
    Int64,
    Int32,
    Float,
    Bool,
    Strings,
    Ints,
    Bools,
    Map,
}

#[derive(Debug, Serialize)]
pub struct GetOutput {
    pub key: String,
    pub kind: ValueKind,
    pub found: bool,
    pub value: Value,
    #[serde(skip)]
    pub text: String,
}

impl CommandOutput for GetOutput {
    fn to_human(&self) -> String {
        self.text.clone()
    }

    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: GetArgs, config: &SharedConfig, json_mode: bool) -> Result<()> {
    let store = config.store()?;
    let value = lookup(store, &args.key, args.kind)?;

    let text = match (&value, args.kind) {
        (Value::String(s), _) => s.clone(),
        (_, ValueKind::Raw) => store
            .get(&args.key)
            .map(ToString::to_string)
            .unwrap_or_default(),
        (other, _) => other.to_string(),
    };

    let output_data = GetOutput {
        found: store.contains(&args.key),
        key: args.key,
        kind: args.kind,
        value,
        text,
    };
    output(&output_data, json_mode);
    Ok(())
}

/// Resolve `key` and coerce it to `kind`.
pub fn lookup(store: &ConfigStore, key: &str, kind: ValueKind) -> Result<Value> {
    Ok(match kind {
        ValueKind::Raw => match store.get(key) {
            Some(value) => serde_json::to_value(value)?,
            None => Value::Null,
        },
        ValueKind::String => json!(store.get_string(key)),
        ValueKind::Int => json!(store.get_int(key)),
        ValueKind::Int64 => json!(store.get_int64(key)),
        ValueKind::Int32 => json!(store.get_int32(key)),
        ValueKind::Float => json!(store.get_float(key)),
        ValueKind::Bool => json!(store.get_bool(key)),
        ValueKind::Strings => json!(store.get_strings(key)),
        ValueKind::Ints => json!(store.get_ints(key)),
        ValueKind::Bools => json!(store.get_bools(key)),
        ValueKind::Map => json!(store.get_map(key)),
    })
}
