//! Example: polling PLC memory
//!
//! Run with: cargo run --example memory_read -- 192.168.250.1
//!
//! This example demonstrates:
//! - Reading a word by text address
//! - Inspecting the status of each reply
//! - Reading a word and a bit in one request

use fins_driver::{ClientConfig, FinsClient};
use std::net::Ipv4Addr;
use std::thread;
use std::time::Duration;

fn main() -> fins_driver::Result<()> {
    let ip: Ipv4Addr = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(Ipv4Addr::new(192, 168, 250, 1));

    let client = FinsClient::new(ClientConfig::new(ip, 1, 0))?;

    for _ in 0..10 {
        let response = client.memory_area_read("D0", 1)?;
        println!(
            "response: {} value: {:?} status: {}",
            hex::encode(response.raw()),
            response.to_words()?,
            response.status_text()
        );
        thread::sleep(Duration::from_millis(100));
    }

    let response = client.multiple_memory_area_read(&["D100", "CIO0.05"])?;
    match response.friendly_data()? {
        Some(values) => println!("D100 = {:02x?}, CIO0.05 = {:02x?}", values[0], values[1]),
        None => println!("PLC reported: {}", response.status_text()),
    }

    Ok(())
}
