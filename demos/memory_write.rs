//! Example: writing PLC memory and switching modes
//!
//! Run with: cargo run --example memory_write -- 192.168.250.1

use fins_driver::{ClientConfig, FinsClient, ForceCode, PlcMode, SetResetSpec};
use std::net::Ipv4Addr;

fn main() -> fins_driver::Result<()> {
    let ip: Ipv4Addr = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(Ipv4Addr::new(192, 168, 250, 1));

    let client = FinsClient::new(ClientConfig::new(ip, 1, 0))?;

    // Set a single bit
    let response = client.memory_area_write("CIO100.1", &[0x01], 1)?;
    println!("Data: {:?}", response.data());
    println!("Code: 0x{:04X}", response.status());
    println!("Status text: {}", response.status_text());

    // Zero out D200-D209
    client.memory_area_fill("D200", &[0x00, 0x00], 10)?.check_error()?;

    // Force W0.00 on, then release every forced bit
    let specs = [SetResetSpec::parse(ForceCode::Set, "W0.00")?];
    client.forced_set_reset(&specs)?.check_error()?;
    client.forced_set_reset_cancel()?.check_error()?;

    client.run(PlcMode::Monitor, None)?.check_error()?;
    Ok(())
}
