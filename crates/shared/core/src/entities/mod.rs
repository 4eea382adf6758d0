mod city;
mod display;
mod permission;
mod slot;
mod timezone;

pub use city::CityRecord;
pub use display::DisplayFormat;
pub use permission::LocationPermission;
pub use slot::{ClockSlot, SlotTime};
pub use timezone::TimeZoneSpec;
