//! HTTP protocol layer module
//!
//! Response construction, decoupled from routing and asset logic.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_403_response, build_404_asset_response, build_404_route_response,
    build_405_response, build_413_response, build_500_response, build_asset_response,
    build_echo_response,
};
