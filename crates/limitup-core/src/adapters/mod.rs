pub mod fixture;
pub mod krx;
pub mod naver;

pub use fixture::{FixtureMarketData, FixtureNews};
pub use krx::KrxAdapter;
pub use naver::NaverNewsAdapter;
