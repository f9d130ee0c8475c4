#![allow(dead_code)]

use axum::{
    body::to_bytes,
    extract::Request,
    response::Response,
};

#[path = "../../src/test_support.rs"]
mod support;

pub use support::{basic_header, request, LogCapture, TEST_PEER};

/// GET request from [`TEST_PEER`], with Basic credentials when given
pub fn get(path: &str, credentials: Option<(&str, &str)>) -> Request {
    request(
        path,
        credentials.map(|(username, password)| basic_header(username, password)),
    )
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}
