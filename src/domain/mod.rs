mod denomination;
mod ledger;
mod money;
mod quantity;

pub use denomination::*;
pub use ledger::*;
pub use money::*;
pub use quantity::*;
