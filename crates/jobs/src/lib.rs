pub mod shipper;

pub use shipper::ShipperJob;
