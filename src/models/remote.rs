// src/models/remote.rs
use serde::{Deserialize, Serialize};

/// What the endpoint said when it answered with an OK status.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteReply {
    Accepted { message: Option<String> },
    Rejected { message: Option<String> },
    // Body was not the expected JSON; counted as delivered
    Unparsed,
}

impl RemoteReply {
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<RemoteBody>(body) {
            Ok(RemoteBody {
                success: true,
                message,
            }) => RemoteReply::Accepted { message },
            Ok(RemoteBody {
                success: false,
                message,
            }) => RemoteReply::Rejected { message },
            Err(_) => RemoteReply::Unparsed,
        }
    }

    pub fn is_delivered(&self) -> bool {
        !matches!(self, RemoteReply::Rejected { .. })
    }
}

#[derive(Debug, Deserialize)]
struct RemoteBody {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub status: String,
}
