//! Common test utilities for building work-order payloads.
use serde_json::json;
use workgraph::prelude::*;

/// Two-root bridge project.
///
/// ```text
/// 1 Site survey (2d, $5000) ── 2 Foundation (10d, $40000) ── 4 Piling (6d, $25000)
///                           └─ 3 Permits (4d, $1500)
/// 5 Deck (12d, $90000) ──────── 6 Railings (3d, $8000)
/// ```
///
/// Duration: max(2, 12) + max(10, 4) + 6 + 3 = 31. Cost: 169500.
#[allow(dead_code)]
pub fn bridge_payload() -> Payload {
    Payload::from_value(json!({
        "work_orders": [
            {
                "id": 1, "task": "Site survey", "duration_days": 2, "estimated_cost": 5000,
                "child_work_orders": [2, 3]
            },
            {
                "id": 2, "task": "Foundation", "duration_days": 10, "estimated_cost": 40000,
                "bill_of_materials": [
                    { "item": "Concrete", "price": 30000, "vendor": "UltraTech" },
                    { "item": "Rebar", "price": 10000, "vendor": "Tata Steel" }
                ],
                "stakeholders": {
                    "City Council": { "role": "approval" },
                    "Contractor": { "role": "execution" }
                },
                "child_work_orders": [4]
            },
            { "id": 3, "task": "Permits", "duration_days": 4, "estimated_cost": 1500 },
            { "id": 4, "task": "Piling", "duration_days": 6, "estimated_cost": 25000 },
            {
                "id": 5, "task": "Deck", "duration_days": 12, "estimated_cost": 90000,
                "child_work_orders": [6]
            },
            { "id": 6, "task": "Railings", "duration_days": 3, "estimated_cost": 8000 }
        ]
    }))
    .expect("bridge payload is well formed")
}

/// A diamond: `D` is a child of both `B` and `C`.
///
/// Duration: 1 + max(2, 3) + 4 + 4 = 12. Cost: 131.
#[allow(dead_code)]
pub fn shared_child_payload() -> Payload {
    Payload::new(vec![
        WorkOrder::new("A", "Shell", 1.0, 100.0).with_children(["B", "C"]),
        WorkOrder::new("B", "East wing", 2.0, 10.0).with_children(["D"]),
        WorkOrder::new("C", "West wing", 3.0, 20.0).with_children(["D"]),
        WorkOrder::new("D", "Roof", 4.0, 1.0),
    ])
}

/// Wraps JSON text the way the generation service does.
#[allow(dead_code)]
pub fn fenced(json: &str) -> String {
    format!("```json\n{}\n```", json)
}

/// Node id of the work order with the given textual id.
#[allow(dead_code)]
pub fn wid(id: &str) -> String {
    format!("work:{}", id)
}
