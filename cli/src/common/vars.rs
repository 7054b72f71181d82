//! Turning `KEY=VALUE` flags into a value map.

use blacksquid::{Arena, Map, Str, Value};

use crate::cli::VarArgs;
use crate::common::{CliError, CliResult};

/// Split `KEY=VALUE` at the first `=`.
pub fn split_binding<'t>(flag: &'static str, text: &'t str) -> CliResult<(&'t str, &'t str)> {
    text.split_once('=').ok_or_else(|| CliError::Binding {
        flag,
        text: text.to_string(),
        reason: "expected KEY=VALUE".to_string(),
    })
}

/// Build the value map for every binding flag.
pub fn build_map<'a>(arena: &'a Arena, vars: &VarArgs) -> CliResult<Map<'a>> {
    let map = Map::new(arena);
    let map = bind(arena, map, "var", &vars.strings, |raw| {
        Ok(Value::Str(Str::new(arena, raw)))
    })?;
    let map = bind(arena, map, "int", &vars.ints, |raw| {
        raw.parse().map(Value::Int).map_err(|e| e.to_string())
    })?;
    let map = bind(arena, map, "uint", &vars.uints, |raw| {
        raw.parse().map(Value::UInt).map_err(|e| e.to_string())
    })?;
    let map = bind(arena, map, "float", &vars.floats, |raw| {
        raw.parse().map(Value::Float).map_err(|e| e.to_string())
    })?;
    bind(arena, map, "list", &vars.lists, |raw| {
        Ok(Value::List(Str::new(arena, raw).split(arena, b',')))
    })
}

/// Upsert every `KEY=VALUE` in `texts`, converting values with `parse`.
fn bind<'a, F>(
    arena: &'a Arena,
    mut map: Map<'a>,
    flag: &'static str,
    texts: &[String],
    parse: F,
) -> CliResult<Map<'a>>
where
    F: Fn(&str) -> Result<Value<'a>, String>,
{
    for text in texts {
        let (key, raw) = split_binding(flag, text)?;
        let value = parse(raw).map_err(|reason| CliError::Binding {
            flag,
            text: text.clone(),
            reason,
        })?;
        tracing::debug!(key, kind = %value.kind(), "bound value");
        map = map.upsert(arena, Str::new(arena, key), value);
    }
    Ok(map)
}
