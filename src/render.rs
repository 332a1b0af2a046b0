use itertools::Itertools;
use serde_json::Value;

/// Controls how many levels get pretty-printed and how far each level is indented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub depth: usize,
    pub indent: usize,
}

impl Default for RenderOptions {
    #[inline]
    fn default() -> Self {
        Self {
            depth: 2,
            indent: 2,
        }
    }
}

/// Parses `line` as JSON and renders it using `opts`
pub fn render_line(line: &str, opts: &RenderOptions) -> Result<String, serde_json::Error> {
    let value: Value = serde_json::from_str(line)?;
    Ok(render_value(&value, opts))
}

/// Renders `value` with the first `opts.depth` levels spread over multiple lines. Everything
/// deeper is rendered compact on a single line.
#[inline]
pub fn render_value(value: &Value, opts: &RenderOptions) -> String {
    render(value, 0, opts)
}

fn render(value: &Value, level: usize, opts: &RenderOptions) -> String {
    if level >= opts.depth {
        return value.to_string();
    }

    let inner = " ".repeat(opts.indent * (level + 1));
    let outer = " ".repeat(opts.indent * level);

    match value {
        Value::Object(map) if !map.is_empty() => {
            let body = map
                .iter()
                .map(|(k, v)| {
                    let key = Value::String(k.to_owned());
                    format!("{}{}: {}", inner, key, render(v, level + 1, opts))
                })
                .join(",\n");
            format!("{{\n{}\n{}}}", body, outer)
        }
        Value::Array(items) if !items.is_empty() => {
            let body = items
                .iter()
                .map(|v| format!("{}{}", inner, render(v, level + 1, opts)))
                .join(",\n");
            format!("[\n{}\n{}]", body, outer)
        }
        // Scalars and empty containers
        _ => value.to_string(),
    }
}
