pub mod address_lookup;

pub use address_lookup::SystemAddressLookup;
