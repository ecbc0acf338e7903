//! Static random-event catalog.
//!
//! Each template perturbs exactly one economic parameter while active.
//! Selection on trigger is uniform over this slice. Pure data.

use crate::{EventEffect, EventKind, EventTemplate};

pub const EVENT_CATALOG: &[EventTemplate] = &[
    EventTemplate {
        id: "raw_material_hike",
        title: "Supply chain crisis!",
        description: "Global shortages have driven up the cost of steel wire. \
                      Raw material costs rise by 50% for a limited time.",
        kind: EventKind::Harmful,
        duration_cycles: 20,
        effect: EventEffect::RawMaterialCost(1.5),
    },
    EventTemplate {
        id: "recession",
        title: "Economic recession",
        description: "A recession has hit and consumers have less disposable \
                      income. Market demand has dropped by 40%.",
        kind: EventKind::Harmful,
        duration_cycles: 30,
        effect: EventEffect::BaseDemand(0.6),
    },
    EventTemplate {
        id: "worker_strike",
        title: "Workers on strike!",
        description: "Your workers are demanding better pay. Salaries are \
                      doubled until an agreement is reached.",
        kind: EventKind::Harmful,
        duration_cycles: 15,
        effect: EventEffect::WorkerSalary(2.0),
    },
    EventTemplate {
        id: "productivity_boost",
        title: "Breakthrough innovation!",
        description: "Your team discovered a new manufacturing technique! \
                      Output per line increases by 25%.",
        kind: EventKind::Beneficial,
        duration_cycles: 25,
        effect: EventEffect::OutputPerWorker(1.25),
    },
    EventTemplate {
        id: "economic_boom",
        title: "Economic boom!",
        description: "The economy is thriving and everyone wants a paperclip! \
                      Market demand has jumped by 50%.",
        kind: EventKind::Beneficial,
        duration_cycles: 25,
        effect: EventEffect::BaseDemand(1.5),
    },
    EventTemplate {
        id: "raw_material_surplus",
        title: "Raw material surplus",
        description: "A new wire supplier has entered the market, pushing \
                      prices down. Raw material costs drop by 30%.",
        kind: EventKind::Beneficial,
        duration_cycles: 20,
        effect: EventEffect::RawMaterialCost(0.7),
    },
];
