pub mod export;
pub mod inspect;
pub mod report;
pub mod util;
