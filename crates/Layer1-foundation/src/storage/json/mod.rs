//! JSON 저장소
//!
//! - `store`: JSONC 파일 읽기(`read_jsonc`), scope별 설정 폴더(`JsonStore`)
//! - `jsonc`: 주석/trailing comma 허용 파싱

mod jsonc;
mod store;

pub use jsonc::{parse_jsonc, strip_json_comments, strip_trailing_commas};
pub use store::{read_jsonc, ConfigScope, JsonStore, APP_DIR_NAME};
