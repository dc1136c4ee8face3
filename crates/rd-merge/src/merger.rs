//! Merge policies.
//!
//! Both policies take their inputs by value and reuse the existing
//! allocations where they can. Object merges update slots in place so key
//! order stays stable under `preserve_order`.

use rd_config::MergeLimits;
use rd_project::sentinel;
use serde_json::{Map, Value};

/// Depth-bounded merge engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentMerger {
    limits: MergeLimits,
}

impl FragmentMerger {
    pub fn new(limits: MergeLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &MergeLimits {
        &self.limits
    }

    /// Streaming-append merge of an incremental chunk into the running value.
    pub fn merge_delta(&self, existing: Option<Value>, incoming: Value) -> Value {
        self.delta_at(existing, incoming, 0)
    }

    /// Completion-snapshot merge of a finished value into the running value.
    pub fn merge_final(&self, existing: Option<Value>, incoming: Value) -> Value {
        self.final_at(existing, incoming, 0)
    }

    fn truncated() -> Value {
        Value::String(sentinel::TRUNCATED.to_string())
    }

    fn delta_at(&self, existing: Option<Value>, incoming: Value, depth: usize) -> Value {
        if depth >= self.limits.max_depth {
            return Self::truncated();
        }
        let Some(existing) = existing else {
            return incoming;
        };

        match (existing, incoming) {
            (Value::String(mut head), Value::String(tail)) => {
                head.push_str(&tail);
                Value::String(head)
            }
            (Value::Array(current), Value::Array(next)) => {
                let mut current = current.into_iter();
                let mut next = next.into_iter();
                let mut merged = Vec::new();
                loop {
                    let item = match (current.next(), next.next()) {
                        (None, None) => break,
                        (Some(e), None) => e,
                        (None, Some(i)) => i,
                        (Some(e), Some(i)) => self.delta_at(Some(e), i, depth + 1),
                    };
                    merged.push(item);
                }
                Value::Array(merged)
            }
            (Value::Object(mut current), Value::Object(next)) => {
                for (key, value) in next {
                    fold_slot(&mut current, key, value, |prev, value| {
                        self.delta_at(prev, value, depth + 1)
                    });
                }
                Value::Object(current)
            }
            (_, incoming) => incoming,
        }
    }

    fn final_at(&self, existing: Option<Value>, incoming: Value, depth: usize) -> Value {
        if depth >= self.limits.max_depth {
            return Self::truncated();
        }
        let Some(existing) = existing else {
            return incoming;
        };

        match (existing, incoming) {
            (Value::String(current), Value::String(next)) => {
                // Longer is more complete; ties keep the earlier snapshot.
                if current.chars().count() >= next.chars().count() {
                    Value::String(current)
                } else {
                    Value::String(next)
                }
            }
            (Value::Array(current), Value::Array(next)) => {
                let mut current = current.into_iter();
                let mut next = next.into_iter();
                let mut merged = Vec::new();
                loop {
                    let item = match (current.next(), next.next()) {
                        (None, None) => break,
                        (Some(e), None) => e,
                        (None, Some(i)) => i,
                        (Some(e), Some(i)) => self.final_at(Some(e), i, depth + 1),
                    };
                    merged.push(item);
                }
                Value::Array(merged)
            }
            (Value::Object(current), Value::Object(next)) => {
                // Start from the incoming keys; the existing view overrides.
                let mut merged = next;
                for (key, value) in current {
                    match merged.get_mut(&key) {
                        Some(slot) => {
                            let incoming = std::mem::take(slot);
                            *slot = self.final_at(Some(value), incoming, depth + 1);
                        }
                        None => {
                            merged.insert(key, value);
                        }
                    }
                }
                Value::Object(merged)
            }
            (Value::Null, incoming) => incoming,
            (existing, _) => existing,
        }
    }
}

/// Replace `map[key]` with `merge(old, value)`, keeping the key's position.
fn fold_slot<F>(map: &mut Map<String, Value>, key: String, value: Value, merge: F)
where
    F: FnOnce(Option<Value>, Value) -> Value,
{
    match map.get_mut(&key) {
        Some(slot) => {
            let prev = std::mem::take(slot);
            *slot = merge(Some(prev), value);
        }
        None => {
            let merged = merge(None, value);
            map.insert(key, merged);
        }
    }
}

/// [`FragmentMerger::merge_delta`] with the default depth ceiling.
pub fn merge_delta(existing: Option<Value>, incoming: Value) -> Value {
    FragmentMerger::default().merge_delta(existing, incoming)
}

/// [`FragmentMerger::merge_final`] with the default depth ceiling.
pub fn merge_final(existing: Option<Value>, incoming: Value) -> Value {
    FragmentMerger::default().merge_final(existing, incoming)
}
