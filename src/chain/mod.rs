//! On-chain registration of purchased domain names.

pub mod registrar;

pub use registrar::{EthersRegistrar, Registrar, RegistrarError, TxOutcome};
