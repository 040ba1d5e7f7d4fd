mod daddress;

pub use daddress::DAddress;
