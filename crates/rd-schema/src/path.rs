//! Field path construction.
//!
//! Object keys join with `.`; array indices append as `[i]` with no dot, so a
//! payload `{"output": [{"role": "ai"}]}` yields `output[0].role`.

/// Path of an object member.
pub fn child_key(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Path of an array element.
pub fn child_index(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_key() {
        assert_eq!(child_key("", "data"), "data");
        assert_eq!(child_key("data", "output"), "data.output");
    }

    #[test]
    fn test_child_index() {
        assert_eq!(child_index("data.output", 0), "data.output[0]");
        assert_eq!(child_index("", 2), "[2]");
        assert_eq!(child_key(&child_index("output", 1), "role"), "output[1].role");
    }
}
