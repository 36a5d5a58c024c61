//! Static candidate directories used across harnesses.

use crate::common::builders::CandidateBuilder;
use condy_core::Candidate;

/// (id, name, plate) rows of the standard driver directory.
pub const DRIVERS: &[(&str, &str, &str)] = &[
    ("drv-1", "Ana Silva", "ABC1234"),
    ("drv-2", "Bruno Costa", "XYZ9999"),
    ("drv-3", "Anderson Lima", "RST2B34"),
    ("drv-4", "Carla Dias", "QWE1A23"),
    ("drv-5", "Mariana Alves", "ANA4321"),
];

/// The standard driver directory as candidates.
pub fn drivers() -> Vec<Candidate> {
    DRIVERS
        .iter()
        .map(|(id, name, plate)| CandidateBuilder::driver(name, plate).id(id).build())
        .collect()
}

/// `n` drivers named `Driver 0000`..., all matching the query `"dr"`.
pub fn many_drivers(n: usize) -> Vec<Candidate> {
    (0..n)
        .map(|i| {
            CandidateBuilder::driver(&format!("Driver {i:04}"), &format!("AAA{i:04}"))
                .id(&format!("drv-{i}"))
                .build()
        })
        .collect()
}

/// The standard directory serialised the way a candidates file is written.
pub fn drivers_json() -> String {
    let rows: Vec<serde_json::Value> = DRIVERS
        .iter()
        .map(|(id, name, plate)| serde_json::json!({ "id": id, "name": name, "plate": plate }))
        .collect();
    serde_json::Value::Array(rows).to_string()
}
