pub mod event;
pub mod matcher;
pub mod session;
pub mod spawn;
pub mod step;
