/*!
 * Zero-value guard for exported JSON documents.
 *
 * Documents are walked with an explicit stack, so arbitrarily deep nesting
 * cannot overflow the call stack.
 */

use serde_json::Value;

/// Paths of every numeric zero (or string parsing to zero) in `document`.
///
/// Paths use `$` for the root, `.key` for object members and `[i]` for array
/// items. Results come out in document order.
pub fn find_zero_values(document: &Value) -> Vec<String> {
    let mut found = Vec::new();
    let mut stack = vec![("$".to_string(), document)];

    while let Some((path, value)) = stack.pop() {
        match value {
            Value::Object(map) => {
                // Reverse so pops come out in key order
                for (key, child) in map.iter().rev() {
                    stack.push((format!("{}.{}", path, key), child));
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate().rev() {
                    stack.push((format!("{}[{}]", path, index), child));
                }
            }
            Value::Number(number) => {
                if number.as_f64().is_some_and(|n| n == 0.0) {
                    found.push(path);
                }
            }
            Value::String(text) => {
                if text.trim().parse::<f64>().is_ok_and(|n| n == 0.0) {
                    found.push(path);
                }
            }
            Value::Bool(_) | Value::Null => {}
        }
    }

    found
}
