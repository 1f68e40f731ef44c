use serde_json::Value;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// Named mock fixtures embedded at compile time.
static FIXTURES: &str = include_str!("fixtures.json");

/// Return a copy of the named fixture.
///
/// Fixtures stored as index-keyed objects (`{"0": .., "1": ..}`) are
/// flattened into plain JSON arrays so tests can iterate them directly.
pub fn data(key: &str) -> Result<Value> {
    let all: Value = serde_json::from_str(FIXTURES)?;
    let entry = all
        .get(key)
        .cloned()
        .ok_or_else(|| AppError::internal(format!("Unknown fixture: {}", key)))?;
    Ok(flatten_indexed(entry))
}

/// Generate a unique collective slug for test isolation
pub fn random_slug() -> String {
    format!("test-{}", Uuid::new_v4())
}

/// An object whose keys are exactly the indices `0..n` is an array in
/// disguise; return its values in index order. Anything else passes through.
fn flatten_indexed(value: Value) -> Value {
    let indexed = match &value {
        Value::Object(map) if !map.is_empty() => {
            let mut indexed: Vec<(usize, Value)> = Vec::with_capacity(map.len());
            let all_indices = map.iter().all(|(key, item)| match key.parse::<usize>() {
                Ok(index) => {
                    indexed.push((index, item.clone()));
                    true
                }
                Err(_) => false,
            });
            if all_indices {
                Some(indexed)
            } else {
                None
            }
        }
        _ => None,
    };

    let Some(mut indexed) = indexed else {
        return value;
    };
    indexed.sort_by_key(|(index, _)| *index);
    if indexed.iter().enumerate().any(|(pos, (index, _))| pos != *index) {
        return value;
    }

    Value::Array(indexed.into_iter().map(|(_, item)| item).collect())
}
