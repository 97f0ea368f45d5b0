//! Fuzz target for engine descriptor parsing and resolution.
//!
//! Parsing must never panic, and any descriptor that parses must resolve to
//! either an engine or a resolution error.

#![no_main]

use assay::{DEFAULT_MODULE, EngineDescriptor, EngineRegistry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    if let Ok(descriptor) = EngineDescriptor::parse(&input) {
        match EngineRegistry::global().resolve(&descriptor, DEFAULT_MODULE) {
            Ok(engine) => assert_eq!(engine.class_name(), descriptor.class_name),
            Err(e) => assert!(e.is_resolution()),
        }
    }
});
