mod slave;
pub use slave::SlaveKind;
