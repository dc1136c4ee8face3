//! Fuzz target for bounded projection.
//!
//! Any JSON document must project and render without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rd_project::ValueProjector;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    for projector in [ValueProjector::snapshot(), ValueProjector::preview()] {
        let projected = projector.project_json(&value);
        let _ = projector.render(&projected.into());
    }
});
