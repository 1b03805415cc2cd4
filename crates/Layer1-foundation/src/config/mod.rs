//! Config - 통합 설정 관리
//!
//! - `warden.rs` - WardenConfig (manifest 위치, 접근 거부 메시지)

mod warden;

pub use warden::{WardenConfig, DEFAULT_ACCESS_DENIED_MESSAGE, WARDEN_CONFIG_FILE};
