//! Turns a JSON request body into a reply the way the deposit calculation endpoint answers:
//! the schedule mapping on success and a single error message otherwise.

use log::debug;
use serde_json::json;

use crate::config::Config;
use crate::core::GenericResult;

use super::application::RawApplicationInput;
use super::schedule;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    fn ok(body: String) -> Reply {
        Reply {status: STATUS_OK, body}
    }

    fn bad_request(message: &str) -> Reply {
        Reply {
            status: STATUS_BAD_REQUEST,
            body: json!({"error": message}).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

pub fn handle(body: &str, config: &Config) -> Reply {
    match process(body, config) {
        Ok(body) => Reply::ok(body),
        Err(err) => {
            debug!("Rejecting the request: {}.", err);
            Reply::bad_request(&err.to_string())
        },
    }
}

fn process(body: &str, config: &Config) -> GenericResult<String> {
    let raw: RawApplicationInput = serde_json::from_str(body).map_err(|e| format!(
        "Invalid request: {}", e))?;

    let application = config.validator().validate(&raw)?;
    let schedule = schedule::compute_schedule_with(&application, config.balance_carry);

    Ok(serde_json::to_string(&schedule)?)
}
