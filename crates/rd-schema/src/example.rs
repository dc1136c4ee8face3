//! Example strings for field summaries.

use rd_common::OpaqueValue;
use rd_config::ProjectionLimits;
use rd_project::{sentinel, ValueProjector};

/// Renders observed values as short human-readable example strings.
#[derive(Debug, Clone)]
pub struct ExampleRenderer {
    preview: ValueProjector,
    max_example_length: usize,
}

impl ExampleRenderer {
    pub fn new(preview: ProjectionLimits, max_example_length: usize) -> Self {
        Self {
            preview: ValueProjector::new(preview),
            max_example_length,
        }
    }

    /// Example string for `value`, or `None` when no rendering is available.
    ///
    /// Primitives stringify directly, with string and marker payloads cut to
    /// the preview string bound. Structured values go through the preview
    /// projection and are flattened to JSON. Every example is then cut to the
    /// example length bound.
    pub fn render(&self, value: &OpaqueValue) -> Option<String> {
        let cut = |text: &str| sentinel::truncate_str(text, self.preview.limits().max_string_length);
        let example = match value {
            OpaqueValue::Missing => sentinel::MISSING.to_string(),
            OpaqueValue::Null => "null".to_string(),
            OpaqueValue::Bool(b) => b.to_string(),
            OpaqueValue::Int(n) => n.to_string(),
            OpaqueValue::Float(f) => format_number(*f),
            OpaqueValue::BigInt(digits) => format!("{}n", cut(digits)),
            OpaqueValue::Identifier(desc) => {
                sentinel::identifier(desc.as_deref().map(cut).as_deref())
            }
            OpaqueValue::Timestamp(ts) => sentinel::timestamp(ts),
            OpaqueValue::Binary(bytes) => sentinel::binary(bytes.len()),
            OpaqueValue::Callable(_) => sentinel::CALLABLE.to_string(),
            OpaqueValue::Stream(_) => sentinel::STREAM.to_string(),
            OpaqueValue::String(s) => cut(s),
            OpaqueValue::Array(_) | OpaqueValue::Object { .. } => self.preview.render(value)?,
        };
        Some(sentinel::truncate_str(&example, self.max_example_length))
    }
}

impl Default for ExampleRenderer {
    fn default() -> Self {
        Self::new(ProjectionLimits::preview(), 240)
    }
}

/// Shortest decimal rendering, with names for the non-finite values.
///
/// Magnitudes from 1e21 up and below 1e-6 switch to exponent form
/// (`1e+21`, `1.5e-7`).
fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    let exp = format!("{:e}", value);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: serde_json::Value) -> String {
        ExampleRenderer::default()
            .render(&OpaqueValue::from(value))
            .unwrap()
    }

    #[test]
    fn test_primitive_examples() {
        assert_eq!(render(json!(null)), "null");
        assert_eq!(render(json!(true)), "true");
        assert_eq!(render(json!(42)), "42");
        assert_eq!(render(json!(1.5)), "1.5");
        assert_eq!(render(json!(3.0)), "3");
        assert_eq!(render(json!("ai")), "ai");
    }

    #[test]
    fn test_exotic_examples() {
        let r = ExampleRenderer::default();
        assert_eq!(r.render(&OpaqueValue::Missing).unwrap(), "undefined");
        assert_eq!(r.render(&OpaqueValue::BigInt("9007199254740993".into())).unwrap(), "9007199254740993n");
        assert_eq!(r.render(&OpaqueValue::Identifier(None)).unwrap(), "Symbol()");
        assert_eq!(r.render(&OpaqueValue::Identifier(Some("id".into()))).unwrap(), "Symbol(id)");
        assert_eq!(r.render(&OpaqueValue::Float(f64::NAN)).unwrap(), "NaN");
        assert_eq!(r.render(&OpaqueValue::Float(f64::NEG_INFINITY)).unwrap(), "-Infinity");
        assert_eq!(r.render(&OpaqueValue::Binary(vec![1, 2])).unwrap(), "[Binary length=2]");
        assert_eq!(r.render(&OpaqueValue::Callable(None)).unwrap(), "[Function]");
    }

    #[test]
    fn test_number_exponent_form() {
        assert_eq!(render(json!(1e21)), "1e+21");
        assert_eq!(render(json!(-2.5e30)), "-2.5e+30");
        assert_eq!(render(json!(1.5e-7)), "1.5e-7");
        assert_eq!(render(json!(123456.75)), "123456.75");
        assert_eq!(render(json!(0.000001)), "0.000001");
        assert_eq!(render(json!(1e20)), "100000000000000000000");
    }

    #[test]
    fn test_marker_payloads_use_preview_bound() {
        let r = ExampleRenderer::default();
        let sym = r.render(&OpaqueValue::Identifier(Some("d".repeat(10_000)))).unwrap();
        assert_eq!(sym, format!("Symbol({}…)", "d".repeat(60)));
        let big = r.render(&OpaqueValue::BigInt("9".repeat(10_000))).unwrap();
        assert_eq!(big, format!("{}…n", "9".repeat(60)));
    }

    #[test]
    fn test_every_example_respects_length_bound() {
        let r = ExampleRenderer::new(ProjectionLimits::preview(), 12);
        let sym = r.render(&OpaqueValue::Identifier(Some("d".repeat(40)))).unwrap();
        assert_eq!(sym.chars().count(), 13);
        assert!(sym.ends_with('…'));
    }

    #[test]
    fn test_long_string_uses_preview_bound() {
        let long = "x".repeat(100);
        let example = render(json!(long));
        assert_eq!(example.chars().count(), 61);
        assert!(example.ends_with('…'));
    }

    #[test]
    fn test_structured_example_is_preview_json() {
        assert_eq!(
            render(json!({"role": "ai", "parts": [1, 2, 3, 4]})),
            r#"{"role":"ai","parts":[1,2,3,"[+1 more]"]}"#
        );
    }

    #[test]
    fn test_structured_example_length_bound() {
        let renderer = ExampleRenderer::new(ProjectionLimits::preview(), 10);
        let example = renderer.render(&OpaqueValue::from(json!({"content": "hello world"}))).unwrap();
        assert_eq!(example, "{\"content\"…");
    }
}
