//! Environmental forcing: the daily temperature curve and drifting clouds

pub mod clouds;
pub mod temperature;

pub use clouds::{drift_mask, generate_cloud_patch, CLOUD_WALK_LENGTH};
pub use temperature::{
    hour_of_day, regenerates_at, DiurnalCycle, TemperatureCurve, TemperatureCycle,
    HOT_IGNITION_FACTOR, HOT_THRESHOLD, HOURS_PER_DAY,
};
