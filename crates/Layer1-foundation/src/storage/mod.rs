//! Storage module for Warden
//!
//! - `json`: JSON/JSONC - 설정 및 manifest 파일 로드/저장

mod json;

pub use json::{
    parse_jsonc, read_jsonc, strip_json_comments, strip_trailing_commas, ConfigScope, JsonStore,
    APP_DIR_NAME,
};
