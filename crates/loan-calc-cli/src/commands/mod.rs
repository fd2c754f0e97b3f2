pub mod compliance;
pub mod loan;
