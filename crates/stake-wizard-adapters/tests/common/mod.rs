#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::Value;
use stake_wizard_core::{Coin, TransactionMessage, Validator};
use tiny_http::{Response, Server, StatusCode};

pub const DELEGATOR: &str = "ixo1delegator";

pub fn reply(code: u16, body: Value) -> (u16, String) {
    (code, body.to_string())
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Value,
}

/// Answers one request per scripted reply body, after `delay`, then stops.
pub fn spawn_mock_server(
    replies: Vec<(u16, String)>,
    delay: Duration,
) -> (String, Arc<Mutex<Vec<RecordedRequest>>>, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());
    let recorded = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&recorded);

    let join = thread::spawn(move || {
        for (code, payload) in replies {
            let mut req = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };
            let mut raw = String::new();
            let _ = req.as_reader().read_to_string(&mut raw);
            if let Ok(mut g) = sink.lock() {
                g.push(RecordedRequest {
                    method: req.method().to_string(),
                    path: req.url().to_owned(),
                    body: serde_json::from_str(&raw).unwrap_or(Value::Null),
                });
            }
            thread::sleep(delay);
            let response =
                Response::from_string(payload).with_status_code(StatusCode(code));
            let _ = req.respond(response);
        }
    });

    (addr, recorded, join)
}

pub fn delegate_message(amount: u128) -> TransactionMessage {
    TransactionMessage::Delegate {
        delegator_address: DELEGATOR.to_owned(),
        validator_address: "ixovaloper1alpha".to_owned(),
        amount: Coin::new("uixo", amount),
    }
}

pub fn validator(address: &str, moniker: &str, commission_bps: u32, voting_power: u64) -> Validator {
    Validator {
        commission_bps: Some(commission_bps),
        voting_power: Some(voting_power),
        ..Validator::new(address, moniker)
    }
}

pub fn sample_validators() -> Vec<Validator> {
    vec![
        validator("ixovaloper1alpha", "Alpha Stake", 500, 9_000),
        validator("ixovaloper1bravo", "bravo nodes", 1_000, 12_000),
        validator("ixovaloper1charlie", "Charlie", 250, 3_000),
    ]
}
