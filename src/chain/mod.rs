pub mod parse;
pub mod select;
pub mod types;

pub use parse::parse_chain_page;
pub use select::{nearest_put, select_put, target_strike};
pub use types::{ChainPage, OptionQuote, OptionType, SelectedPut, CONTRACT_MULTIPLIER};
