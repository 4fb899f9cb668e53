pub mod compose;
pub mod gas;
pub mod offramp;
pub mod ranker;
pub mod service;
pub mod slippage;
