// ドライバーアダプター（入力側）
// HTTP/JSONのREST APIをアプリケーションサービスに接続する

pub mod request_dto;
pub mod response_dto;
pub mod rest_api;
