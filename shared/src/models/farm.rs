//! Static farm layout: fields and the sensors mounted on them

use serde::Serialize;

/// A cultivated plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub id: &'static str,
    pub crop: &'static str,
    pub area_hectares: f64,
}

/// A sensor node; each field carries exactly one
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sensor {
    pub id: &'static str,
    pub field: &'static Field,
}

impl Sensor {
    pub fn field_id(&self) -> &'static str {
        self.field.id
    }
}

pub static FIELDS: [Field; 4] = [
    Field {
        id: "Field_A",
        crop: "Tomatoes",
        area_hectares: 2.5,
    },
    Field {
        id: "Field_B",
        crop: "Wheat",
        area_hectares: 5.0,
    },
    Field {
        id: "Greenhouse_C",
        crop: "Lettuce",
        area_hectares: 0.8,
    },
    Field {
        id: "Orchard_D",
        crop: "Olives",
        area_hectares: 3.2,
    },
];

pub static SENSORS: [Sensor; 4] = [
    Sensor {
        id: "sensor_001",
        field: &FIELDS[0],
    },
    Sensor {
        id: "sensor_002",
        field: &FIELDS[1],
    },
    Sensor {
        id: "sensor_003",
        field: &FIELDS[2],
    },
    Sensor {
        id: "sensor_004",
        field: &FIELDS[3],
    },
];
