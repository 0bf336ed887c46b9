//! Rules consulted by the safety core: the brake-percentage speed table and
//! the dangerous-goods compatibility matrix.

mod danger;
mod rule_book;
mod rule_source;
mod speed;

pub use danger::*;
pub use rule_book::*;
pub use rule_source::*;
pub use speed::*;
