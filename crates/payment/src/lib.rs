pub mod amount;
pub mod paymongo;

pub use amount::{centavos_to_pesos, pesos_to_centavos};
pub use paymongo::{PaymentStatus, PaymongoClient};
