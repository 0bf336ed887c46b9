mod assessment;
mod composition;
mod train_summary;

pub use assessment::*;
pub use composition::*;
pub use train_summary::*;
