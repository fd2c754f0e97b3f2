use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{display_scalar, result_of};

/// Format output as tables using the tabled crate.
///
/// Scalars of the result go into a Field/Value table; nested objects (the
/// compliance verdict) and arrays of objects (the schedule) get their own.
pub fn print_table(value: &Value) {
    let envelope = value.as_object();
    match result_of(value) {
        Value::Object(map) => print_object(map),
        Value::Array(arr) => print_array_table(arr),
        other => println!("{}", display_scalar(other)),
    }

    if let Some(envelope) = envelope {
        print_envelope_notes(envelope);
    }
}

fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if !is_nested(val) {
            builder.push_record([key.as_str(), &display_scalar(val)]);
        }
    }
    println!("{}", Table::from(builder));

    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                println!("\n{}:", key);
                print_object(inner);
            }
            Value::Array(arr) if !arr.is_empty() => {
                println!("\n{}:", key);
                print_array_table(arr);
            }
            _ => {}
        }
    }
}

fn is_nested(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(arr) => !arr.is_empty(),
        _ => false,
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    // Collect all keys from first object for headers
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(display_scalar).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", display_scalar(item));
        }
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(rec)) = envelope.get("recommendation") {
        println!("\nRecommendation: {}", rec);
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
