use crate::value::Value;

/// Collects the `(field, value)` assignments carried by the result of a
/// type's grammar, outermost capture first.
///
/// A capture whose match contains another capture for the same field leaves
/// the assignment to the inner one. Captures nested inside a capture for a
/// different field are routed as well.
pub(crate) fn bindings(value: Value) -> Vec<(usize, Value)> {
    let mut out = Vec::new();
    route(value, &mut out);
    out
}

fn route(value: Value, out: &mut Vec<(usize, Value)>) {
    match value {
        Value::Capture { field, value, .. } => {
            if !value.captures_field(field) {
                out.push((field, value.as_ref().clone().strip_captures()));
            }
            route(*value, out);
        }
        Value::List(items) => {
            for item in items {
                route(item, out);
            }
        }
        Value::Maybe(Some(inner)) => route(*inner, out),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(field: usize, value: Value) -> Value {
        Value::Capture {
            field,
            column: 1,
            value: Box::new(value),
        }
    }

    fn text(text: &str) -> Value {
        Value::Text(text.to_string())
    }

    fn texts(bindings: &[(usize, Value)]) -> Vec<(usize, String)> {
        bindings
            .iter()
            .map(|(field, value)| (*field, value.text().unwrap_or_default()))
            .collect()
    }

    #[test]
    fn test_plain_values_bind_nothing() {
        assert!(bindings(Value::List(vec![text("a"), Value::Maybe(None)])).is_empty());
    }

    #[test]
    fn test_nested_capture_for_other_field() {
        // $( 'k' $'v' )  with the outer marker in field 0, the inner in field 1
        let value = capture(0, Value::List(vec![text("k"), capture(1, text("v"))]));
        assert_eq!(texts(&bindings(value)), [(0, "kv".to_string()), (1, "v".to_string())]);
    }

    #[test]
    fn test_inner_capture_wins_for_same_field() {
        let value = capture(0, Value::List(vec![text("k"), capture(0, text("v"))]));
        assert_eq!(texts(&bindings(value)), [(0, "v".to_string())]);
    }

    #[test]
    fn test_captures_inside_repetitions() {
        let value = Value::List(vec![
            Value::Maybe(Some(Box::new(capture(2, text("x"))))),
            Value::List(vec![capture(1, text("a")), capture(1, text("b"))]),
        ]);
        assert_eq!(
            texts(&bindings(value)),
            [(2, "x".to_string()), (1, "a".to_string()), (1, "b".to_string())]
        );
    }
}
