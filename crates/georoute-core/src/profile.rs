//! Truck travel-mode profile sent with every route request.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineType {
    Electric,
    InternalCombustion,
    PluginHybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardousCargo {
    Combustible,
    Corrosive,
    Explosive,
    Flammable,
    Gas,
    HarmfulToWater,
    Organic,
    Other,
    Poison,
    PoisonousInhalation,
    Radioactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TruckType {
    LightTruck,
    StraightTruck,
    Tractor,
}

/// Vehicle parameters used to bias route calculation toward truck-legal roads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TruckOptions {
    pub axle_count: u32,
    pub engine_type: EngineType,
    /// Gross weight in kilograms
    pub gross_weight: u64,
    pub hazardous_cargos: Vec<HazardousCargo>,
    /// Height in centimeters
    pub height: u64,
    /// Length in centimeters
    pub length: u64,
    /// Speed cap in km/h
    pub max_speed: f64,
    pub occupancy: u32,
    /// Payload capacity in kilograms
    pub payload_capacity: u64,
    pub tire_count: u32,
    pub truck_type: TruckType,
    /// Width in centimeters
    pub width: u64,
}

impl Default for TruckOptions {
    /// The demo truck: a four-axle straight truck carrying gas.
    fn default() -> Self {
        Self {
            axle_count: 4,
            engine_type: EngineType::InternalCombustion,
            gross_weight: 10_000,
            hazardous_cargos: vec![HazardousCargo::Gas],
            height: 2_800,
            length: 1_200,
            max_speed: 80.0,
            occupancy: 2,
            payload_capacity: 9_000,
            tire_count: 8,
            truck_type: TruckType::StraightTruck,
            width: 250,
        }
    }
}
