mod inventory_source;
mod telemetry_sink;

pub use inventory_source::InventorySource;
pub use telemetry_sink::TelemetrySink;

#[cfg(test)]
pub use inventory_source::MockInventorySource;
#[cfg(test)]
pub use telemetry_sink::MockTelemetrySink;
